use jsonbind_core::{
    ConvertError, ConverterRegistry, RecordValue, RegistryBuilder, StructuralRecord, TypeDescriptor, TypeExpr, Value,
};
use serde_json::json;

fn person_type() -> TypeDescriptor {
    TypeDescriptor::named("Person")
}

fn registry() -> ConverterRegistry {
    let mut builder = RegistryBuilder::new();
    builder.register_record(
        StructuralRecord::new("Person")
            .field("name", TypeDescriptor::string())
            .field("age", TypeDescriptor::i32())
            .field("nickname", TypeDescriptor::option(TypeDescriptor::string()))
            .field("tags", TypeDescriptor::list(TypeDescriptor::string()))
            .field("extra", TypeExpr::named("Json")),
    );
    builder.seal()
}

fn person(nickname: Option<&str>) -> Value {
    RecordValue::new(person_type())
        .with("name", "Ada")
        .with("age", 36)
        .with("nickname", nickname.map_or_else(Value::none, |n| Value::some(Value::string(n))))
        .with("tags", vec!["math", "engines"])
        .with("extra", Value::Json(json!({"born": 1815})))
        .into()
}

#[test]
fn test_round_trip() {
    let registry = registry();
    let json = json!({
        "name": "Ada",
        "age": 36,
        "nickname": "Countess",
        "tags": ["math", "engines"],
        "extra": {"born": 1815}
    });

    let value = registry.deserialize(&json, &person_type()).unwrap();
    assert_eq!(value, person(Some("Countess")));
    assert_eq!(registry.serialize(&value).unwrap(), json);
}

#[test]
fn test_absent_optional_is_null() {
    let registry = registry();
    let json = json!({"name": "Ada", "age": 36, "nickname": null, "tags": [], "extra": null});
    let value = registry.deserialize(&json, &person_type()).unwrap();
    let record = value.as_record().unwrap();
    assert_eq!(record.get("nickname"), Some(&Value::none()));
    assert_eq!(record.get("tags"), Some(&Value::List(vec![])));
    assert_eq!(registry.serialize(&value).unwrap(), json);
}

#[test]
fn test_field_order_follows_declaration() {
    let registry = registry();
    let text = registry.to_json_string(&person(None)).unwrap();
    assert_eq!(
        text,
        r#"{"name":"Ada","age":36,"nickname":null,"tags":["math","engines"],"extra":{"born":1815}}"#
    );
}

#[test]
fn test_all_errors_are_reported() {
    let registry = registry();
    let json = json!({
        "name": 5,
        "surname": "Lovelace",
        "nickname": 7,
        "tags": ["ok", false, "ok", null],
        "extra": {}
    });

    let err = registry.deserialize(&json, &person_type()).unwrap_err();
    let errors: Vec<(String, String)> = err
        .flattened()
        .into_iter()
        .map(|e| (e.path_string(), e.message))
        .collect();
    assert_eq!(
        errors,
        vec![
            ("surname".to_string(), "unexpected property".to_string()),
            ("name".to_string(), "expected string, found: 5".to_string()),
            ("age".to_string(), "missing property".to_string()),
            ("nickname".to_string(), "expected string, found: 7".to_string()),
            ("tags[1]".to_string(), "expected string, found: false".to_string()),
            ("tags[3]".to_string(), "expected string, found: null".to_string()),
        ]
    );
}

#[test]
fn test_serializing_a_malformed_instance_is_a_programming_error() {
    let registry = registry();
    let value: Value = RecordValue::new(person_type()).with("name", "Ada").into();
    let err = registry.serialize(&value).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidRecordValue { .. }));
    assert!(!err.is_validation());
}
