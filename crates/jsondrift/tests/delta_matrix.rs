mod common;

use common::{obj, pats};
use jsondrift::delta;
use serde_json::{json, Value};

struct Case {
    name: &'static str,
    recorded: Value,
    actual: Value,
    ignore: &'static [&'static str],
    changed: bool,
}

fn cases() -> Vec<Case> {
    vec![
        // ── No change ────────────────────────────────────────────────────
        Case { name: "no change", recorded: json!({"foo": "bar"}), actual: json!({"foo": "bar"}), ignore: &[], changed: false },
        Case {
            name: "no change, nested object",
            recorded: json!({"foo": "bar", "inner": {"foo": "bar"}}),
            actual: json!({"foo": "bar", "inner": {"foo": "bar"}}),
            ignore: &[],
            changed: false,
        },
        Case {
            name: "no change, array",
            recorded: json!({"foo": "bar", "list": ["foo", "bar"]}),
            actual: json!({"foo": "bar", "list": ["foo", "bar"]}),
            ignore: &[],
            changed: false,
        },
        Case {
            name: "no change, more types",
            recorded: json!({"bool": true, "int": 4, "null": null}),
            actual: json!({"bool": true, "int": 4, "null": null}),
            ignore: &[],
            changed: false,
        },
        // ── Changed field ────────────────────────────────────────────────
        Case { name: "value changed", recorded: json!({"foo": "bar"}), actual: json!({"foo": "changed"}), ignore: &[], changed: true },
        Case { name: "value changed, ignored", recorded: json!({"foo": "bar"}), actual: json!({"foo": "changed"}), ignore: &["foo"], changed: false },
        Case { name: "null recorded, value returned", recorded: json!({"foo": null}), actual: json!({"foo": "changed"}), ignore: &[], changed: true },
        Case { name: "value recorded, null returned", recorded: json!({"foo": "bar"}), actual: json!({"foo": null}), ignore: &[], changed: true },
        Case {
            name: "null field omitted by server",
            recorded: json!({"foo": "bar", "baz": null}),
            actual: json!({"foo": "bar"}),
            ignore: &[],
            changed: false,
        },
        // ── Added / removed field ────────────────────────────────────────
        Case { name: "field added", recorded: json!({"foo": "bar"}), actual: json!({"foo": "bar", "new": "field"}), ignore: &[], changed: true },
        Case { name: "field added, ignored", recorded: json!({"foo": "bar"}), actual: json!({"foo": "bar", "new": "field"}), ignore: &["new"], changed: false },
        Case { name: "field removed", recorded: json!({"foo": "bar", "id": "foobar"}), actual: json!({"foo": "bar"}), ignore: &[], changed: true },
        Case { name: "field removed, ignored", recorded: json!({"foo": "bar", "id": "foobar"}), actual: json!({"foo": "bar"}), ignore: &["id"], changed: false },
        // ── Deep fields ──────────────────────────────────────────────────
        Case {
            name: "deep field changed",
            recorded: json!({"outside": {"change": "a"}}),
            actual: json!({"outside": {"change": "b"}}),
            ignore: &[],
            changed: true,
        },
        Case {
            name: "deep field added",
            recorded: json!({"outside": {"change": "a"}}),
            actual: json!({"outside": {"change": "a", "add": "a"}}),
            ignore: &[],
            changed: true,
        },
        Case {
            name: "deep field removed",
            recorded: json!({"outside": {"change": "a", "remove": "a"}}),
            actual: json!({"outside": {"change": "a"}}),
            ignore: &[],
            changed: true,
        },
        Case {
            name: "deep field changed, ignored",
            recorded: json!({"outside": {"change": "a"}}),
            actual: json!({"outside": {"change": "b"}}),
            ignore: &["outside.change"],
            changed: false,
        },
        Case {
            name: "deep field added, ignored",
            recorded: json!({"outside": {"change": "a"}}),
            actual: json!({"outside": {"change": "a", "add": "a"}}),
            ignore: &["outside.add"],
            changed: false,
        },
        Case {
            name: "deep field removed, ignored",
            recorded: json!({"outside": {"change": "a", "remove": "a"}}),
            actual: json!({"outside": {"change": "a"}}),
            ignore: &["outside.remove"],
            changed: false,
        },
        Case {
            name: "deep fields changed, one watched",
            recorded: json!({"outside": {"watch": "me", "change": "a", "remove": "a"}}),
            actual: json!({"outside": {"watch": "me_change", "change": "b", "add": "a"}}),
            ignore: &["outside.change", "outside.add", "outside.remove"],
            changed: true,
        },
        Case {
            name: "deep fields changed, parent ignored",
            recorded: json!({"outside": {"watch": "me", "change": "a", "remove": "a"}}),
            actual: json!({"outside": {"watch": "me_change", "change": "b", "add": "a"}}),
            ignore: &["outside"],
            changed: false,
        },
        // ── Lists ────────────────────────────────────────────────────────
        Case { name: "list grew", recorded: json!({"list": ["foo", "bar"]}), actual: json!({"list": ["foo", "bar", "baz"]}), ignore: &[], changed: true },
        Case { name: "list shrank", recorded: json!({"list": ["foo", "bar"]}), actual: json!({"list": ["foo"]}), ignore: &[], changed: true },
        Case { name: "list item changed", recorded: json!({"list": ["foo", "bar"]}), actual: json!({"list": ["foo", "BAR"]}), ignore: &[], changed: true },
        Case { name: "list reordered", recorded: json!({"list": ["foo", "bar"]}), actual: json!({"list": ["bar", "foo"]}), ignore: &[], changed: true },
        Case { name: "list reordered, ignored", recorded: json!({"list": ["foo", "bar"]}), actual: json!({"list": ["bar", "foo"]}), ignore: &["list"], changed: false },
        Case {
            name: "sub-value in list of objects",
            recorded: json!({"list": [{"key": "foo", "val": "x"}, {"key": "bar", "val": "x"}]}),
            actual: json!({"list": [{"key": "foo", "val": "Y"}, {"key": "bar", "val": "Z"}]}),
            ignore: &[],
            changed: true,
        },
        // ── Pattern shapes ───────────────────────────────────────────────
        Case { name: "wildcard at root", recorded: json!({"metadata": "v1"}), actual: json!({"metadata": "v2"}), ignore: &["*.metadata"], changed: false },
        Case {
            name: "wildcard nested",
            recorded: json!({"outer": {"metadata": "v1"}}),
            actual: json!({"outer": {"metadata": "v2"}}),
            ignore: &["*.metadata"],
            changed: false,
        },
        Case {
            name: "wildcard at several levels",
            recorded: json!({"metadata": "v1", "outer": {"metadata": "v1", "inner": {"metadata": "v1"}}}),
            actual: json!({"metadata": "v2", "outer": {"metadata": "v2", "inner": {"metadata": "v2"}}}),
            ignore: &["*.metadata"],
            changed: false,
        },
        Case {
            name: "simple key does not reach nested level",
            recorded: json!({"metadata": "v1", "outer": {"metadata": "v1"}}),
            actual: json!({"metadata": "v1", "outer": {"metadata": "v2"}}),
            ignore: &["metadata"],
            changed: true,
        },
        Case {
            name: "simple key at root",
            recorded: json!({"metadata": "v1", "outer": {"foo": "bar"}}),
            actual: json!({"metadata": "v2", "outer": {"foo": "bar"}}),
            ignore: &["metadata"],
            changed: false,
        },
        Case {
            name: "dotted path matches its path only",
            recorded: json!({"outer": {"metadata": "v1"}, "metadata": "v1"}),
            actual: json!({"outer": {"metadata": "v2"}, "metadata": "v2"}),
            ignore: &["outer.metadata"],
            changed: true,
        },
        Case {
            name: "wildcard mixed with dotted path",
            recorded: json!({"id": "1", "outer": {"id": "2", "metadata": "v1"}}),
            actual: json!({"id": "1", "outer": {"id": "3", "metadata": "v2"}}),
            ignore: &["*.id", "outer.metadata"],
            changed: false,
        },
        Case {
            name: "wildcard deep",
            recorded: json!({"a": {"b": {"c": {"version": "1"}}}}),
            actual: json!({"a": {"b": {"c": {"version": "2"}}}}),
            ignore: &["*.version"],
            changed: false,
        },
        Case {
            name: "wildcard in array of objects",
            recorded: json!({"items": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]}),
            actual: json!({"items": [{"id": "10", "name": "a"}, {"id": "20", "name": "b"}]}),
            ignore: &["*.id"],
            changed: false,
        },
        Case {
            name: "scoped wildcard",
            recorded: json!({"id": 1, "outer": {"x": {"id": 1}}}),
            actual: json!({"id": 1, "outer": {"x": {"id": 2}}}),
            ignore: &["outer.*.id"],
            changed: false,
        },
        Case {
            name: "scoped wildcard outside its scope",
            recorded: json!({"id": 1, "other": {"id": 1}}),
            actual: json!({"id": 1, "other": {"id": 2}}),
            ignore: &["outer.*.id"],
            changed: true,
        },
    ]
}

#[test]
fn test_delta_matrix() {
    for case in cases() {
        let d = delta(&obj(case.recorded), &obj(case.actual), &pats(case.ignore));
        assert_eq!(d.changed, case.changed, "case: {}", case.name);
    }
}

#[test]
fn test_type_conversion_matrix() {
    let values = [
        ("string", json!("foo")),
        ("number", json!(42)),
        ("object", json!({"foo": "bar"})),
        ("array", json!(["foo", "bar"])),
        ("bool_true", json!(true)),
        ("bool_false", json!(false)),
    ];
    for (from_name, from) in &values {
        for (to_name, to) in &values {
            let d = delta(
                &obj(json!({"value": from})),
                &obj(json!({"value": to})),
                &[],
            );
            assert_eq!(
                d.changed,
                from_name != to_name,
                "conversion from {from_name} to {to_name}"
            );
            if d.changed {
                assert_eq!(d.merged["value"], *to);
            }
        }
    }
}

#[test]
fn test_merged_tree_keeps_recorded_values() {
    let recorded = json!({
        "name": "Joey",
        "color": "tabby",
        "hobbies": {"hunting": "birds", "eating": "plants"}
    });
    let actual = json!({
        "color": "tabby",
        "hairball": true,
        "hobbies": {"hunting": "birds", "eating": "plants", "sleeping": "yep"}
    });
    let d = delta(
        &obj(recorded.clone()),
        &obj(actual),
        &pats(&["hairball", "hobbies.sleeping", "name"]),
    );
    assert!(!d.changed);
    assert_eq!(d.into_value(), recorded);
}

#[test]
fn test_merged_tree_takes_actual_changes() {
    let recorded = json!({"keep": 1, "list": [1, 2], "o": {"a": 1, "ts": 1}, "ts": 0});
    let actual = json!({"keep": 1, "list": [1, 2, 3], "o": {"a": 2, "ts": 9}, "ts": 5, "extra": true});
    let d = delta(&obj(recorded), &obj(actual), &pats(&["*.ts"]));
    assert!(d.changed);
    assert_eq!(
        d.into_value(),
        json!({"keep": 1, "list": [1, 2, 3], "o": {"a": 2, "ts": 1}, "ts": 0, "extra": true})
    );
}

#[test]
fn test_equal_length_arrays_substitute_per_index() {
    let recorded = json!({"list": ["a", {"k": 1, "meta": "x"}, 3]});
    let actual = json!({"list": ["b", {"k": 1, "meta": "y"}, 3]});
    let d = delta(&obj(recorded), &obj(actual), &pats(&["*.meta"]));
    assert!(d.changed);
    assert_eq!(d.merged["list"], json!(["b", {"k": 1, "meta": "x"}, 3]));
}

#[test]
fn test_keys_the_server_dropped_become_null() {
    let recorded = json!({"a": 1, "b": {"c": 1}, "s": "x", "n": null});
    let d = delta(&obj(recorded), &obj(json!({"a": 1})), &[]);
    assert!(d.changed);
    assert_eq!(d.into_value(), json!({"a": 1, "b": null, "s": null, "n": null}));
}
