use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::annotation::{Annotation, MethodIdentity};
use crate::jni::Binding;
use crate::taint_catalog::TaintClass;
use crate::value::Value;

mod icc;
mod sink;

/// Something a session reports to the caller instead of encoding it in a value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Finding {
    /// `startActivity` on an Intent carrying ICC state.
    IccEdge {
        caller: String,
        activity_name: Option<String>,
        extras: BTreeMap<String, Option<Annotation>>,
    },
    /// A tainted value reached a catalog sink.
    TaintedSink {
        method: String,
        position: usize,
        categories: Vec<String>,
    },
    /// `RegisterNatives` replaced a binding with a different function pointer.
    NativeRebind {
        name: String,
        signature: String,
        class_name: Option<String>,
        previous: u64,
        current: u64,
    },
}

pub(crate) const ICC_EDGE_RULE: &str = "JNI_ICC_EDGE";
pub(crate) const TAINTED_SINK_RULE: &str = "JNI_TAINTED_SINK";
pub(crate) const NATIVE_REBIND_RULE: &str = "JNI_NATIVE_REBIND";

impl Finding {
    pub(crate) fn rule_id(&self) -> &'static str {
        match self {
            Finding::IccEdge { .. } => ICC_EDGE_RULE,
            Finding::TaintedSink { .. } => TAINTED_SINK_RULE,
            Finding::NativeRebind { .. } => NATIVE_REBIND_RULE,
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Finding::IccEdge {
                activity_name,
                extras,
                ..
            } => {
                let target = activity_name.as_deref().unwrap_or("<unknown activity>");
                let keys: Vec<&str> = extras.keys().map(String::as_str).collect();
                format!("ICC edge to {target} with extras [{}]", keys.join(", "))
            }
            Finding::TaintedSink {
                method,
                position,
                categories,
            } => format!(
                "Tainted argument {position} ({}) reaches sink {method}",
                categories.join(", ")
            ),
            Finding::NativeRebind {
                name,
                signature,
                previous,
                current,
                ..
            } => format!(
                "Native method {name}{signature} rebound from {previous:#x} to {current:#x}"
            ),
        }
    }

    /// Method the finding is attributed to, rendered as a full signature.
    pub(crate) fn location(&self) -> String {
        match self {
            Finding::IccEdge { caller, .. } => caller.clone(),
            Finding::TaintedSink { method, .. } => method.clone(),
            Finding::NativeRebind {
                name,
                signature,
                class_name,
                ..
            } => match class_name {
                Some(class_name) => format!("L{class_name};.{name}:{signature}"),
                None => format!("{name}:{signature}"),
            },
        }
    }
}

/// One resolved `Call*Method*` as seen by observers.
pub(crate) struct Invocation<'a> {
    pub(crate) method: &'a MethodIdentity,
    pub(crate) full_signature: &'a str,
    pub(crate) classification: &'a TaintClass,
    pub(crate) binding: Binding,
    pub(crate) receiver: Option<&'a mut Value>,
    /// Java-level arguments, receiver and ids excluded.
    pub(crate) arguments: &'a mut [Value],
    /// Annotation the call will return, after taint resolution.
    pub(crate) returned: Option<&'a mut Annotation>,
}

impl Invocation<'_> {
    pub(crate) fn is(&self, class_name: &str, method_name: &str) -> bool {
        self.method.class_name == class_name && self.method.method_name == method_name
    }

    pub(crate) fn argument(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }

    pub(crate) fn string_argument(&self, index: usize) -> Option<&str> {
        self.argument(index)
            .and_then(Value::string_literal)
            .map(|literal| literal.value.as_str())
    }
}

/// Cross-cutting policy run on every method invocation after taint resolution.
pub(crate) trait InvocationObserver: Send + Sync {
    fn id(&self) -> &'static str;
    fn observe(&self, invocation: &mut Invocation<'_>, findings: &mut Vec<Finding>);
}

/// Wrapper struct for observer factory functions to enable inventory collection.
pub(crate) struct ObserverFactory(pub fn() -> Box<dyn InvocationObserver>);

inventory::collect!(ObserverFactory);

/// Macro to register an observer implementation.
///
/// Usage: `register_observer!(ObserverName);`
#[macro_export]
macro_rules! register_observer {
    ($observer_type:ty) => {
        inventory::submit! {
            $crate::observers::ObserverFactory(|| Box::new(<$observer_type>::default()))
        }
    };
}

/// Returns all registered observers in id order.
pub(crate) fn all_observers() -> &'static [Box<dyn InvocationObserver>] {
    static OBSERVERS: OnceLock<Vec<Box<dyn InvocationObserver>>> = OnceLock::new();
    OBSERVERS.get_or_init(|| {
        let mut observers: Vec<Box<dyn InvocationObserver>> = inventory::iter::<ObserverFactory>
            .into_iter()
            .map(|factory| (factory.0)())
            .collect();
        observers.sort_by_key(|observer| observer.id());
        observers
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn all_observers_have_unique_ids() {
        let observers = all_observers();
        let ids: BTreeSet<_> = observers.iter().map(|observer| observer.id()).collect();
        assert_eq!(ids.len(), observers.len());
        assert!(ids.contains("icc"));
        assert!(ids.contains("sink"));
    }

    #[test]
    fn observers_run_in_id_order() {
        let ids: Vec<_> = all_observers().iter().map(|observer| observer.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn findings_map_to_rule_ids() {
        let finding = Finding::NativeRebind {
            name: "run".to_string(),
            signature: "()V".to_string(),
            class_name: Some("com/example/Native".to_string()),
            previous: 0x10,
            current: 0x20,
        };
        assert_eq!(finding.rule_id(), NATIVE_REBIND_RULE);
        assert_eq!(finding.location(), "Lcom/example/Native;.run:()V");
        assert_eq!(
            finding.message(),
            "Native method run()V rebound from 0x10 to 0x20"
        );
    }
}
