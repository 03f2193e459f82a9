//! Compiled, immutable property table
//!
//! `PropertyTable::build` turns the raw declarative definitions into the
//! runtime form the engine works with:
//!
//! - virtual sub-property templates (`base!(a|b|c)`) are expanded into
//!   concrete entries `base.a`, `base.b`, `base.c` sharing the template's
//!   query/receive rules, each marked virtual
//! - receive and accept patterns are compiled once
//! - an ordered list of match rules is produced for the inbound dispatcher;
//!   every rule is tried against every line, so the rule list deliberately
//!   contains only non-virtual entries (a template contributes one shared
//!   rule with a fan-out prefix)
//!
//! Expansion runs entirely inside `build`; the table never changes after.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Serialize;

use crate::definition::{DecodeFn, EncodeFn, Metadata, PropertyDef, QuerySpec};
use crate::error::{ProtocolError, Result};

/// Marker prefix for internal properties (hook feed only, never listed).
pub const INTERNAL_PREFIX: char = '#';

/// Trailing marker for wildcard query names (`audio.dsp.*`).
pub const WILDCARD: char = '*';

/// Compiled transmit rule.
pub struct Transmit {
    pub accept: Option<Regex>,
    pub encode: EncodeFn,
}

/// Receive-side info kept per property (the compiled pattern itself lives
/// in the shared [`MatchRule`] list).
pub struct Receive {
    /// Properties to re-query when this one updates.
    pub refresh: &'static [&'static str],
}

/// A fully compiled property table entry.
pub struct Property {
    pub feature: Option<&'static str>,
    pub query: Option<QuerySpec>,
    pub transmit: Option<Transmit>,
    pub receive: Option<Receive>,
    pub metadata: Option<Metadata>,
    /// Expanded from a sub-property template.
    pub virtual_entry: bool,
    /// Name carries the internal marker; feeds hooks only.
    pub internal: bool,
}

/// One inbound dispatch rule: pattern, decoder and routing info.
pub struct MatchRule {
    /// Property name the rule reports for (the raw template name for
    /// fan-out rules).
    pub name: String,
    pub internal: bool,
    /// For template rules: prefix to prepend to record field names.
    pub fanout_prefix: Option<String>,
    pub pattern: Regex,
    pub decode: DecodeFn,
}

/// Host-facing capability summary for one property.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyInfo {
    pub can_query: bool,
    pub can_read: bool,
    pub can_write: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// The expanded, immutable property table.
pub struct PropertyTable {
    entries: Vec<(String, Property)>,
    index: HashMap<String, usize>,
    rules: Vec<MatchRule>,
}

impl PropertyTable {
    /// Build and expand the table from raw definitions.
    ///
    /// Order of `raw` is preserved for listing. Fails on unparseable
    /// patterns, duplicate names and definitions with no rules at all.
    pub fn build(raw: Vec<(&'static str, PropertyDef)>) -> Result<Self> {
        let template_re =
            Regex::new(r"^([^!]*)!\((.+)\)$").expect("sub-property template pattern is valid");

        let mut table = PropertyTable {
            entries: Vec::with_capacity(raw.len()),
            index: HashMap::new(),
            rules: Vec::new(),
        };

        for (name, def) in raw {
            if def.query.is_none() && def.transmit.is_none() && def.receive.is_none() {
                return Err(ProtocolError::EmptyDefinition(name.to_string()));
            }

            match template_re.captures(name) {
                Some(caps) => {
                    let prefix = caps.get(1).map_or("", |m| m.as_str());
                    let alts: Vec<&str> = caps
                        .get(2)
                        .map_or("", |m| m.as_str())
                        .split('|')
                        .filter(|a| !a.is_empty())
                        .collect();
                    if alts.is_empty() {
                        return Err(ProtocolError::EmptyTemplate(name.to_string()));
                    }

                    if let Some(rx) = &def.receive {
                        table.rules.push(MatchRule {
                            name: name.to_string(),
                            internal: name.starts_with(INTERNAL_PREFIX),
                            fanout_prefix: Some(prefix.to_string()),
                            pattern: compile(name, rx.pattern)?,
                            decode: rx.decode,
                        });
                    }

                    for alt in alts {
                        let full = format!("{prefix}{alt}");
                        let internal = full.starts_with(INTERNAL_PREFIX);
                        let prop = Property {
                            feature: def.feature,
                            query: def.query.clone(),
                            transmit: None,
                            receive: def.receive.as_ref().map(|r| Receive { refresh: r.refresh }),
                            metadata: def.metadata,
                            virtual_entry: true,
                            internal,
                        };
                        table.insert(full, prop)?;
                    }
                }
                None => {
                    let internal = name.starts_with(INTERNAL_PREFIX);
                    if let Some(rx) = &def.receive {
                        table.rules.push(MatchRule {
                            name: name.to_string(),
                            internal,
                            fanout_prefix: None,
                            pattern: compile(name, rx.pattern)?,
                            decode: rx.decode,
                        });
                    }
                    let transmit = match &def.transmit {
                        Some(tx) => Some(Transmit {
                            accept: tx.accept.map(|p| compile(name, p)).transpose()?,
                            encode: tx.encode,
                        }),
                        None => None,
                    };
                    let prop = Property {
                        feature: def.feature,
                        query: def.query.clone(),
                        transmit,
                        receive: def.receive.as_ref().map(|r| Receive { refresh: r.refresh }),
                        metadata: def.metadata,
                        virtual_entry: false,
                        internal,
                    };
                    table.insert(name.to_string(), prop)?;
                }
            }
        }

        Ok(table)
    }

    fn insert(&mut self, name: String, prop: Property) -> Result<()> {
        if self.index.contains_key(&name) {
            return Err(ProtocolError::DuplicateName(name));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, prop));
        Ok(())
    }

    /// Look up a property by exact name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// True iff the property exists and its feature tag (if any) is active.
    pub fn is_enabled(&self, name: &str, features: &HashSet<String>) -> bool {
        match self.get(name) {
            Some(prop) => match prop.feature {
                Some(tag) => features.contains(tag),
                None => true,
            },
            None => false,
        }
    }

    /// All non-internal, enabled property names in table order.
    pub fn properties(&self, features: &HashSet<String>) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(name, prop)| !prop.internal && self.is_enabled(name, features))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Distinct channel names (property name up to the last separator),
    /// in first-seen order.
    pub fn channels(&self, features: &HashSet<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in self.properties(features) {
            if let Some(pos) = name.rfind('.') {
                let chan = &name[..pos];
                if seen.insert(chan.to_string()) {
                    out.push(chan.to_string());
                }
            }
        }
        out
    }

    /// Capability summary for a (non-internal) property.
    pub fn property_info(&self, name: &str) -> Option<PropertyInfo> {
        let prop = self.get(name)?;
        if prop.internal {
            return None;
        }
        Some(PropertyInfo {
            can_query: prop.query.is_some(),
            can_read: prop.receive.is_some(),
            can_write: prop.transmit.is_some(),
            metadata: prop.metadata,
        })
    }

    /// Ordered inbound dispatch rules. Callers must try every rule against
    /// every line; several rules may fire for the same line.
    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    /// All expanded names in table order (including internal entries).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of expanded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ProtocolError::BadPattern {
        name: name.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Decoded, QueryFlags, RxRule, TxRule};
    use crate::value::Value;

    fn rx(pattern: &'static str) -> RxRule {
        RxRule {
            pattern,
            decode: |caps| {
                Some(Decoded::Value(Value::Str(
                    caps.get(1).map_or("", |m| m.as_str()).to_string(),
                )))
            },
            refresh: &[],
        }
    }

    fn features(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn sample() -> Vec<(&'static str, PropertyDef)> {
        vec![
            (
                "a.one",
                PropertyDef {
                    query: Some(QuerySpec::new(QueryFlags::C, "?ONE")),
                    receive: Some(rx("^ONE(.+)$")),
                    ..Default::default()
                },
            ),
            (
                "a.sub.!(x|y)",
                PropertyDef {
                    query: Some(QuerySpec::new(QueryFlags::C, "?SUB")),
                    receive: Some(RxRule {
                        pattern: "^SUB(.)(.)$",
                        decode: |caps| {
                            Some(Decoded::Record(vec![
                                ("x", Value::Str(caps[1].to_string())),
                                ("y", Value::Str(caps[2].to_string())),
                            ]))
                        },
                        refresh: &[],
                    }),
                    ..Default::default()
                },
            ),
            (
                "b.gated",
                PropertyDef {
                    feature: Some("Extra"),
                    transmit: Some(TxRule {
                        accept: Some("^[0-9]$"),
                        encode: |v| Some(format!("{v}GT")),
                    }),
                    ..Default::default()
                },
            ),
            (
                "#hidden",
                PropertyDef {
                    receive: Some(rx("^HID(.+)$")),
                    ..Default::default()
                },
            ),
        ]
    }

    #[test]
    fn test_expansion_produces_virtual_entries() {
        let table = PropertyTable::build(sample()).unwrap();

        assert!(table.get("a.sub.x").is_some());
        assert!(table.get("a.sub.y").is_some());
        assert!(table.get("a.sub.!(x|y)").is_none());
        assert!(table.get("a.sub.x").unwrap().virtual_entry);

        // Virtual entries inherit the template's query rule.
        let q = table.get("a.sub.y").unwrap().query.as_ref().unwrap();
        assert_eq!(q.commands, vec!["?SUB".to_string()]);
    }

    #[test]
    fn test_template_contributes_single_fanout_rule() {
        let table = PropertyTable::build(sample()).unwrap();
        let fanouts: Vec<_> = table
            .rules()
            .iter()
            .filter(|r| r.fanout_prefix.is_some())
            .collect();
        assert_eq!(fanouts.len(), 1);
        assert_eq!(fanouts[0].fanout_prefix.as_deref(), Some("a.sub."));
    }

    #[test]
    fn test_listing_order_and_visibility() {
        let table = PropertyTable::build(sample()).unwrap();

        // Feature off: gated entry hidden, internal entry always hidden.
        let names = table.properties(&features(&[]));
        assert_eq!(names, vec!["a.one", "a.sub.x", "a.sub.y"]);

        // Feature on: gated entry appears in insertion order.
        let names = table.properties(&features(&["Extra"]));
        assert_eq!(names, vec!["a.one", "a.sub.x", "a.sub.y", "b.gated"]);
    }

    #[test]
    fn test_channels() {
        let table = PropertyTable::build(sample()).unwrap();
        let chans = table.channels(&features(&["Extra"]));
        assert_eq!(chans, vec!["a", "a.sub", "b"]);
    }

    #[test]
    fn test_feature_gating() {
        let table = PropertyTable::build(sample()).unwrap();
        assert!(!table.is_enabled("b.gated", &features(&[])));
        assert!(table.is_enabled("b.gated", &features(&["Extra"])));
        assert!(table.is_enabled("a.one", &features(&[])));
        assert!(!table.is_enabled("missing", &features(&["Extra"])));
    }

    #[test]
    fn test_property_info() {
        let table = PropertyTable::build(sample()).unwrap();

        let info = table.property_info("a.one").unwrap();
        assert!(info.can_query && info.can_read && !info.can_write);

        let info = table.property_info("b.gated").unwrap();
        assert!(!info.can_query && !info.can_read && info.can_write);

        assert!(table.property_info("#hidden").is_none());
        assert!(table.property_info("missing").is_none());
    }

    #[test]
    fn test_empty_definition_rejected() {
        let raw = vec![("bare", PropertyDef::default())];
        assert!(matches!(
            PropertyTable::build(raw),
            Err(ProtocolError::EmptyDefinition(_))
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut raw = sample();
        raw.push((
            "a.one",
            PropertyDef {
                receive: Some(rx("^DUP(.+)$")),
                ..Default::default()
            },
        ));
        assert!(matches!(
            PropertyTable::build(raw),
            Err(ProtocolError::DuplicateName(_))
        ));
    }
}
