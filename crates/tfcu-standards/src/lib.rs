#![deny(unsafe_code)]

pub mod catalog;
pub mod config;

pub use crate::catalog::{RULE_CATALOG, RuleCategory, RuleSpec, rule_spec, rules_in};
pub use crate::config::{
    CalloutStyle, HeaderRowRules, RequiredField, SPEC_CONFIG, SPEC_VERSION, SentenceLengthRules,
    SpecConfig,
};
