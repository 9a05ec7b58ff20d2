/// Lifecycle controller tests
/// State transitions, trigger gating per callback, and the native attribute surface
use crate::*;
use lite_props::{PropKind, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type Snapshot = BTreeMap<String, Value>;
type RenderLog = Rc<RefCell<Vec<(ElementId, Snapshot)>>>;

fn host() -> (CustomElementRegistry<Snapshot>, RenderLog) {
    let log: RenderLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let host = CustomElementRegistry::new(move |output: Snapshot, target: ElementId| {
        sink.borrow_mut().push((target, output));
    });
    (host, log)
}

fn config(name: &str) -> ElementConfig<Snapshot> {
    ElementConfig::new(name, |props| props.to_map())
        .with_prop("label")
        .with_prop(("count", PropKind::Int))
        .with_prop(("flag", PropKind::Boolean))
        .with_prop(("data", PropKind::Json))
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_connect_and_disconnect_transitions() {
        let (mut host, _log) = host();
        host.define(config("x-state")).unwrap();
        let mut el = host.create("x-state").unwrap();

        assert_eq!(el.lifecycle(), Lifecycle::Unconnected);
        el.connected_callback();
        assert_eq!(el.lifecycle(), Lifecycle::Connected);
        el.connected_callback();
        assert!(el.has_connected());
        el.disconnected_callback();
        assert_eq!(el.lifecycle(), Lifecycle::Unconnected);
    }

    #[test]
    fn test_adopt_does_not_change_state() {
        let (mut host, log) = host();
        host.define(config("x-adopt").with_render_mask(RenderMask::ADOPT))
            .unwrap();
        let mut el = host.create("x-adopt").unwrap();

        assert!(el.adopted_callback());
        assert_eq!(el.lifecycle(), Lifecycle::Unconnected);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_construct_trigger_renders_defaults() {
        let (mut host, log) = host();
        host.define(config("x-construct").with_render_mask(RenderMask::CONSTRUCT | RenderMask::CONNECT))
            .unwrap();
        let el = host.create("x-construct").unwrap();

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, el.id());
        assert_eq!(log[0].1["count"], Value::Int(0));
    }

    #[test]
    fn test_default_mask_skips_construct_and_disconnect() {
        let (mut host, log) = host();
        host.define(config("x-default")).unwrap();
        let mut el = host.create("x-default").unwrap();

        assert!(log.borrow().is_empty());
        assert!(el.connected_callback());
        assert!(!el.disconnected_callback());
        assert!(!el.adopted_callback());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_disconnect_restores_deferral() {
        let (mut host, log) = host();
        host.define(config("x-redefer")).unwrap();
        let mut el = host.create("x-redefer").unwrap();

        el.connected_callback();
        el.set("label", "a").unwrap();
        el.disconnected_callback();
        assert!(!el.set("label", "b").unwrap());

        assert_eq!(log.borrow().len(), 2);
        assert_eq!(el.get("label"), Some(&Value::from("b")));
    }

    #[test]
    fn test_render_all_mask_renders_every_lifecycle_event() {
        let (mut host, log) = host();
        host.define(config("x-all").with_render_mask(RenderMask::ALL)).unwrap();
        let mut el = host.create("x-all").unwrap();

        el.set("label", "before connect").unwrap();
        el.connected_callback();
        el.adopted_callback();
        el.disconnected_callback();

        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn test_set_unknown_property_is_an_error() {
        let (mut host, _log) = host();
        host.define(config("x-unknown")).unwrap();
        let mut el = host.create("x-unknown").unwrap();

        match el.set("missing", 1) {
            Err(ElementError::UnknownProperty { element, name }) => {
                assert_eq!(element, "x-unknown");
                assert_eq!(name, "missing");
            }
            other => panic!("Expected UnknownProperty, got {:?}", other),
        }
    }

    #[test]
    fn test_prop_handle_reads_and_writes_slot() {
        let (mut host, log) = host();
        host.define(config("x-handle")).unwrap();
        let mut el = host.create("x-handle").unwrap();
        el.connected_callback();

        let count = el.element_type().prop("count").unwrap();
        assert!(el.set_prop(count, 5).unwrap());
        assert_eq!(el.get_prop(count), Some(&Value::Int(5)));
        assert_eq!(log.borrow().last().unwrap().1["count"], Value::Int(5));
    }

    #[test]
    fn test_prop_handle_from_other_type_is_rejected() {
        let (mut host, log) = host();
        host.define(config("x-owner")).unwrap();
        host.define(config("x-borrower")).unwrap();
        let owner = host.create("x-owner").unwrap();
        let mut el = host.create("x-borrower").unwrap();
        el.connected_callback();

        let count = owner.element_type().prop("count").unwrap();
        assert!(matches!(
            el.set_prop(count, 5),
            Err(ElementError::UnknownProperty { .. })
        ));
        assert_eq!(el.get_prop(count), None);
        assert_eq!(el.get("count"), Some(&Value::Int(0)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_set_attribute_lowercases_and_routes_to_field() {
        let (mut host, _log) = host();
        host.define(config("x-attr")).unwrap();
        let mut el = host.create("x-attr").unwrap();

        el.set_attribute("Count", "12").unwrap();

        assert_eq!(el.get_attribute("count"), Some("12"));
        assert_eq!(el.get("count"), Some(&Value::Int(12)));
    }

    #[test]
    fn test_unobserved_attribute_is_invisible() {
        let (mut host, log) = host();
        host.define(config("x-unobserved").with_render_mask(RenderMask::ATTR))
            .unwrap();
        let mut el = host.create("x-unobserved").unwrap();

        assert!(!el.set_attribute("class", "big").unwrap());
        assert!(el.has_attribute("class"));
        assert_eq!(el.get("class"), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_host_callback_stores_unknown_attribute_verbatim() {
        let (mut host, _log) = host();
        host.define(config("x-verbatim")).unwrap();
        let mut el = host.create("x-verbatim").unwrap();

        el.attribute_changed_callback("data-Extra", None, Some("1")).unwrap();

        assert_eq!(el.get("data-Extra"), Some(&Value::from("1")));
        assert_eq!(el.props().get("data-Extra"), Some(&Value::from("1")));
    }

    #[test]
    fn test_remove_boolean_attribute_clears_flag() {
        let (mut host, _log) = host();
        host.define(config("x-remove")).unwrap();
        let mut el = host.create("x-remove").unwrap();

        el.set_attribute("flag", "").unwrap();
        assert_eq!(el.get("flag"), Some(&Value::Boolean(true)));

        el.remove_attribute("flag").unwrap();
        assert_eq!(el.get("flag"), Some(&Value::Boolean(false)));
        assert!(!el.remove_attribute("flag").unwrap());
    }

    #[test]
    fn test_identical_old_and_new_attribute_is_ignored() {
        let (mut host, log) = host();
        host.define(config("x-same").with_render_mask(RenderMask::ATTR))
            .unwrap();
        let mut el = host.create("x-same").unwrap();

        assert!(!el
            .attribute_changed_callback("label", Some("a"), Some("a"))
            .unwrap());
        assert_eq!(el.get("label"), Some(&Value::from("")));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_malformed_json_attribute_returns_error_without_render() {
        let (mut host, log) = host();
        host.define(config("x-json").with_render_mask(RenderMask::ATTR))
            .unwrap();
        let mut el = host.create("x-json").unwrap();

        let result = el.set_attribute("data", "{\"open\": ");
        assert!(matches!(result, Err(ElementError::Coercion(_))));
        assert_eq!(el.get("data"), Some(&Value::Json(serde_json::json!({}))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_renders_follow_event_order() {
        let (mut host, log) = host();
        host.define(config("x-order")).unwrap();
        let mut el = host.create("x-order").unwrap();
        el.connected_callback();

        el.set("count", 1).unwrap();
        el.set_attribute("count", "2").unwrap();
        el.set("count", 3).unwrap();

        let counts: Vec<Value> = log.borrow().iter().map(|(_, s)| s["count"].clone()).collect();
        assert_eq!(
            counts,
            vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_non_numeric_attribute_stores_nan_once() {
        let (mut host, log) = host();
        host.define(config("x-nan")).unwrap();
        let mut el = host.create("x-nan").unwrap();
        el.connected_callback();

        assert!(el.set_attribute("count", "lots").unwrap());
        assert_eq!(el.get("count"), Some(&Value::NotANumber));
        assert!(!el.set_attribute("count", "many").unwrap());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let (mut host, _log) = host();
        host.define(config("x-shared")).unwrap();
        let mut a = host.create("x-shared").unwrap();
        let b = host.create("x-shared").unwrap();

        a.set("label", "only a").unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(b.get("label"), Some(&Value::from("")));
    }
}
