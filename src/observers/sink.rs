use tracing::info;

use crate::jni::Binding;
use crate::taint_catalog::TaintClass;
use crate::value::Value;

use super::{Finding, Invocation, InvocationObserver};

/// Reports tainted values passed to catalog sinks.
#[derive(Default)]
pub(crate) struct SinkDetector;

crate::register_observer!(SinkDetector);

impl InvocationObserver for SinkDetector {
    fn id(&self) -> &'static str {
        "sink"
    }

    fn observe(&self, invocation: &mut Invocation<'_>, findings: &mut Vec<Finding>) {
        let TaintClass::Sink { selector } = invocation.classification else {
            return;
        };
        for (position, value) in positions(invocation) {
            if !selector.selects(position) {
                continue;
            }
            let Some(taint) = value.taint().filter(|taint| taint.is_tainted) else {
                continue;
            };
            info!(
                "tainted argument {position} reaches {}",
                invocation.full_signature
            );
            findings.push(Finding::TaintedSink {
                method: invocation.full_signature.to_string(),
                position,
                categories: taint.categories.iter().cloned().collect(),
            });
        }
    }
}

/// Sink positions: the receiver is 0 for instance calls.
fn positions<'i>(invocation: &'i Invocation<'_>) -> Vec<(usize, &'i Value)> {
    let receiver = match invocation.binding {
        Binding::Instance | Binding::Nonvirtual => invocation.receiver.as_deref(),
        Binding::Static => None,
    };
    let offset = usize::from(receiver.is_some());
    receiver
        .map(|receiver| (0, receiver))
        .into_iter()
        .chain(
            invocation
                .arguments
                .iter()
                .enumerate()
                .map(|(index, value)| (index + offset, value)),
        )
        .collect()
}
