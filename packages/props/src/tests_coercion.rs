/// Coercion table tests
/// Defaults per kind, attribute conversion, and declaration parsing
use crate::*;
use serde_json::json;

#[cfg(test)]
mod coercion_tests {
    use super::*;

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(default_for(None), Value::String(String::new()));
        assert_eq!(default_for(Some(&PropKind::String)), Value::String(String::new()));
        assert_eq!(default_for(Some(&PropKind::Boolean)), Value::Boolean(false));
        assert_eq!(default_for(Some(&PropKind::Int)), Value::Int(0));
        assert_eq!(default_for(Some(&PropKind::Number)), Value::Number(0.0));
        assert_eq!(default_for(Some(&PropKind::Json)), Value::Json(json!({})));
    }

    #[test]
    fn test_unknown_kind_defaults_to_null() {
        let kind = PropKind::from_name("date");
        assert_eq!(kind, PropKind::Unknown("date".to_string()));
        assert_eq!(default_for(Some(&kind)), Value::Null);
        assert_eq!(convert(&kind, "when", Some("2020")).unwrap(), Value::Null);
    }

    #[test]
    fn test_string_is_passthrough() {
        let value = convert(&PropKind::String, "label", Some("  Hello ")).unwrap();
        assert_eq!(value, Value::from("  Hello "));
    }

    #[test]
    fn test_boolean_false_in_any_case() {
        for raw in ["false", "FALSE", "False", "fAlSe"] {
            let value = convert(&PropKind::Boolean, "flag", Some(raw)).unwrap();
            assert_eq!(value, Value::Boolean(false), "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_boolean_other_strings_are_true() {
        for raw in ["", "true", "0", "no", "flag", " false"] {
            let value = convert(&PropKind::Boolean, "flag", Some(raw)).unwrap();
            assert_eq!(value, Value::Boolean(true), "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_boolean_removed_attribute_is_false() {
        let value = convert(&PropKind::Boolean, "flag", None).unwrap();
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_int_and_number_conversion() {
        assert_eq!(convert(&PropKind::Int, "n", Some("12abc")).unwrap(), Value::Int(12));
        assert_eq!(
            convert(&PropKind::Number, "n", Some("1.25rem")).unwrap(),
            Value::Number(1.25)
        );
    }

    #[test]
    fn test_non_numeric_becomes_nan() {
        assert_eq!(convert(&PropKind::Int, "n", Some("abc")).unwrap(), Value::NotANumber);
        assert_eq!(convert(&PropKind::Number, "n", Some("")).unwrap(), Value::NotANumber);
        assert_eq!(convert(&PropKind::Int, "n", None).unwrap(), Value::NotANumber);
    }

    #[test]
    fn test_json_object_round_trip() {
        let raw = r#"{ "hello": "world", "nested": { "n": [1, 2, 3] } }"#;
        let value = convert(&PropKind::Json, "data", Some(raw)).unwrap();

        let reserialized = serde_json::to_string(&value).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(reparsed, json!({"nested": {"n": [1, 2, 3]}, "hello": "world"}));
    }

    #[test]
    fn test_malformed_json_propagates() {
        let err = convert(&PropKind::Json, "data", Some("{not json")).unwrap_err();
        match err {
            CoercionError::MalformedJson { field, .. } => assert_eq!(field, "data"),
        }
    }

    #[test]
    fn test_json_removed_attribute_is_null() {
        assert_eq!(convert(&PropKind::Json, "data", None).unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_props_normalizes_both_forms() {
        let specs = parse_props(vec![
            PropDecl::from("name"),
            PropDecl::from(("value", PropKind::Number)),
        ]);

        assert_eq!(specs[0], PropertySpec::untyped("name"));
        assert_eq!(specs[1], PropertySpec::typed("value", PropKind::Number));
    }

    #[test]
    fn test_parse_props_keeps_duplicates() {
        let specs = parse_props(vec!["a", "a"]);
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_prop_decl_from_json() {
        let decls: Vec<PropDecl> =
            serde_json::from_str(r#"["fooBar", ["flag", "boolean"], ["when", "date"]]"#).unwrap();
        let specs = parse_props(decls);

        assert_eq!(specs[0].attribute_name(), "foobar");
        assert_eq!(specs[1].kind, Some(PropKind::Boolean));
        assert_eq!(specs[2].kind, Some(PropKind::Unknown("date".to_string())));
    }

    #[test]
    fn test_conform_numeric_writes_to_declared_kind() {
        assert!(matches!(conform(&PropKind::Number, Value::Int(7)), Value::Number(n) if n == 7.0));
        assert!(matches!(conform(&PropKind::Int, Value::Number(3.0)), Value::Int(3)));
        assert!(matches!(conform(&PropKind::Int, Value::Number(3.5)), Value::Number(n) if n == 3.5));
        assert!(matches!(conform(&PropKind::String, Value::Int(1)), Value::Int(1)));
        assert!(matches!(conform(&PropKind::Number, Value::NotANumber), Value::NotANumber));
    }
}
