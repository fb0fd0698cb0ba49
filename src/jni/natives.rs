use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::observers::Finding;
use crate::signature::JniType;

use super::{Call, CallOutcome};

/// Upper bound on `RegisterNatives` record counts.
pub(crate) const MAX_NATIVE_RECORDS: u64 = 65_536;

/// Function pointer bound to one `(name, signature)` pair.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct NativeBinding {
    pub(crate) class_name: Option<String>,
    pub(crate) fn_ptr: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Registration {
    New,
    Same,
    Rebound { previous: u64 },
}

/// Session-scoped table of dynamically registered native methods.
#[derive(Clone, Debug, Default)]
pub(crate) struct NativeRegistry {
    bindings: BTreeMap<(String, String), NativeBinding>,
}

impl NativeRegistry {
    /// Record a binding; a conflicting pointer overwrites and is reported.
    pub(crate) fn register(
        &mut self,
        name: &str,
        signature: &str,
        binding: NativeBinding,
    ) -> Registration {
        let key = (name.to_string(), signature.to_string());
        match self.bindings.insert(key, binding.clone()) {
            None => Registration::New,
            Some(previous) if previous.fn_ptr == binding.fn_ptr => Registration::Same,
            Some(previous) => Registration::Rebound {
                previous: previous.fn_ptr,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn resolve(&self, name: &str, signature: &str) -> Option<&NativeBinding> {
        self.bindings
            .get(&(name.to_string(), signature.to_string()))
    }

    /// Drop every binding registered for `class_name`; returns how many were removed.
    pub(crate) fn unregister_class(&mut self, class_name: &str) -> usize {
        let before = self.bindings.len();
        self.bindings
            .retain(|_, binding| binding.class_name.as_deref() != Some(class_name));
        before - self.bindings.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str, &NativeBinding)> {
        self.bindings
            .iter()
            .map(|((name, signature), binding)| (name.as_str(), signature.as_str(), binding))
    }
}

/// `RegisterNatives(clazz, methods, nMethods)`.
pub(super) fn register_natives(call: &mut Call<'_>) -> CallOutcome {
    let class_name = call
        .arg(0)
        .and_then(|class| class.class_identity())
        .map(|class| class.class_name.clone());
    let (Some(base), Some(count)) = (
        call.arg(1).map(|methods| methods.handle),
        call.arg(2).map(|count| count.handle),
    ) else {
        return call.fallback(JniType::Int);
    };
    let count = if count > MAX_NATIVE_RECORDS {
        warn!("RegisterNatives count {count} capped at {MAX_NATIVE_RECORDS}");
        MAX_NATIVE_RECORDS
    } else {
        count
    };
    let word = u64::from(call.pointer_bits() / 8);
    let stride = 3 * word;
    for index in 0..count {
        let record = base.wrapping_add(index * stride);
        let Some((name, signature, fn_ptr)) = read_record(call, record, word) else {
            warn!("RegisterNatives record {index} at {record:#x} is unreadable");
            break;
        };
        let binding = NativeBinding {
            class_name: class_name.clone(),
            fn_ptr,
        };
        match call.natives.register(&name, &signature, binding) {
            Registration::New => info!("native: {name}{signature} -> {fn_ptr:#x}"),
            Registration::Same => debug!("native {name}{signature} registered again"),
            Registration::Rebound { previous } => {
                warn!("native {name}{signature} rebound from {previous:#x} to {fn_ptr:#x}");
                call.findings.push(Finding::NativeRebind {
                    name,
                    signature,
                    class_name: class_name.clone(),
                    previous,
                    current: fn_ptr,
                });
            }
        }
    }
    call.fresh(JniType::Int)
}

/// `UnregisterNatives(clazz)`.
pub(super) fn unregister_natives(call: &mut Call<'_>) -> CallOutcome {
    let Some(class_name) = call
        .arg(0)
        .and_then(|class| class.class_identity())
        .map(|class| class.class_name.clone())
    else {
        return call.fallback(JniType::Int);
    };
    let removed = call.natives.unregister_class(&class_name);
    debug!("unregistered {removed} natives of {class_name}");
    call.fresh(JniType::Int)
}

fn read_record(call: &Call<'_>, record: u64, word: u64) -> Option<(String, String, u64)> {
    let name = call.host.read_pointer(record)?;
    let signature = call.host.read_pointer(record.checked_add(word)?)?;
    let fn_ptr = call.host.read_pointer(record.checked_add(2 * word)?)?;
    Some((
        call.host.read_c_string(name)?,
        call.host.read_c_string(signature)?,
        fn_ptr,
    ))
}
