//! Declaration fixtures for common scenarios.

/// Two features, two codes each, no constraints.
pub const TWO_BY_TWO: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p", "q"] }
    ],
    "constraints": []
}"#;

/// `B` restricted to `p` by an unnamed domain rule.
pub const DOMAIN_RESTRICTION: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p", "q"] }
    ],
    "constraints": [
        { "rule_type": "domain", "feature": "B", "allowed_values": ["p"] }
    ]
}"#;

/// `B` is nulled whenever `A = x`.
pub const NULL_ACTION: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p", "q"] }
    ],
    "constraints": [
        {
            "rule_type": "conditional",
            "id": "C1",
            "conditions": [{ "feature": "A", "value": "x" }],
            "actions": [{ "feature": "B", "mode": "null" }]
        }
    ]
}"#;

/// `A = x` requires `B = q`, but `B` only offers `p`.
pub const BLOCK_ALL: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p"] }
    ],
    "constraints": [
        {
            "rule_type": "conditional",
            "id": "C1",
            "conditions": [{ "feature": "A", "value": "x" }],
            "actions": [{ "feature": "B", "mode": "block", "allowed_values": ["q"] }]
        }
    ]
}"#;

/// A null action followed by rules that observe the nulled feature.
///
/// - `N1`: `A = x` nulls `C`
/// - `B1`: `B = q` requires `C = u`
/// - `D1`: `C` must be `u` or nulled
pub const BLOCK_AND_NULL_CHAIN: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p", "q"] },
        { "name": "C", "domain": ["u", "v"] }
    ],
    "constraints": [
        {
            "rule_type": "conditional",
            "id": "N1",
            "conditions": [{ "feature": "A", "value": "x" }],
            "actions": [{ "feature": "C", "mode": "null" }]
        },
        {
            "rule_type": "conditional",
            "id": "B1",
            "conditions": [{ "feature": "B", "value": "q" }],
            "actions": [{ "feature": "C", "mode": "block", "allowed_values": ["u"] }]
        },
        { "rule_type": "domain", "id": "D1", "feature": "C", "allowed_values": ["u", "None"] }
    ]
}"#;

/// Two rules that both reject `x/q`.
pub const OVERLAPPING_BLOCKERS: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x", "y"] },
        { "name": "B", "domain": ["p", "q"] }
    ],
    "constraints": [
        {
            "rule_type": "conditional",
            "id": "first",
            "conditions": [{ "feature": "A", "value": "x" }],
            "actions": [{ "feature": "B", "mode": "block", "allowed_values": ["p"] }]
        },
        { "rule_type": "domain", "id": "second", "feature": "B", "allowed_values": ["p"] }
    ]
}"#;

pub const UNKNOWN_RULE_TYPE: &str = r#"{
    "features": [{ "name": "A", "domain": ["x"] }],
    "constraints": [{ "rule_type": "range", "feature": "A" }]
}"#;

pub const DUPLICATE_FEATURE: &str = r#"{
    "features": [
        { "name": "A", "domain": ["x"] },
        { "name": "A", "domain": ["y"] }
    ],
    "constraints": []
}"#;
