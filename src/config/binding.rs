//! Replays loader configuration through a string/string setter.
//!
//! The loader is configured the way a host's configuration framework would
//! drive it: one `set_attribute` call per attribute, then a single
//! `end_set_attributes` once the element is complete.

use crate::config::schema::LoaderConfig;

/// Receiver of loosely-typed configuration attributes.
pub trait PropertyBinding {
    /// Apply one attribute. Returns false if it was rejected.
    fn set_attribute(&self, name: &str, value: &str) -> bool;

    /// Every attribute for this pass has been delivered.
    fn end_set_attributes(&self);
}

/// Attribute names the target refused during [`bind_loader`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub accepted: usize,
    pub rejected: Vec<String>,
}

/// Feed `config` to `target`: flags first, then file slots in key order.
pub fn bind_loader(config: &LoaderConfig, target: &dyn PropertyBinding) -> BindReport {
    let mut report = BindReport::default();

    let flags = [
        ("overwrite", config.overwrite),
        ("load_first", config.load_first),
        ("replace_properties", config.replace_properties),
    ];
    let attributes = flags
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .chain(config.files.iter().map(|(k, v)| (k.clone(), v.clone())));

    for (name, value) in attributes {
        if target.set_attribute(&name, &value) {
            report.accepted += 1;
        } else {
            tracing::warn!(attribute = %name, "Loader attribute rejected");
            report.rejected.push(name);
        }
    }

    target.end_set_attributes();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
    }

    impl PropertyBinding for Recording {
        fn set_attribute(&self, name: &str, value: &str) -> bool {
            self.calls.lock().unwrap().push(format!("{name}={value}"));
            name != "file.bad"
        }

        fn end_set_attributes(&self) {
            self.calls.lock().unwrap().push("end".to_string());
        }
    }

    #[test]
    fn test_bind_order_and_report() {
        let mut config = LoaderConfig::default();
        config.files.insert("file.2".into(), "/b".into());
        config.files.insert("file.1".into(), "/a".into());
        config.files.insert("file.bad".into(), "/c".into());

        let target = Recording::default();
        let report = bind_loader(&config, &target);

        assert_eq!(report.accepted, 5);
        assert_eq!(report.rejected, vec!["file.bad".to_string()]);
        assert_eq!(
            *target.calls.lock().unwrap(),
            vec![
                "overwrite=true",
                "load_first=false",
                "replace_properties=false",
                "file.1=/a",
                "file.2=/b",
                "file.bad=/c",
                "end",
            ]
        );
    }
}
