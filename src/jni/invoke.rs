use tracing::{debug, warn};

use crate::annotation::{Annotation, Provenance, TaintInfo, TaintSourceKind, construct_annotation};
use crate::observers::{Invocation, all_observers};
use crate::signature::parse_method_signature;
use crate::taint_catalog::TaintClass;

use super::{Binding, Call, CallOutcome, InvokeSpec};

/// Generic `Call[Nonvirtual|Static]<Type>Method[V|A]`.
pub(super) fn invoke(call: &mut Call<'_>, spec: InvokeSpec) -> CallOutcome {
    let method_id_index = spec.binding.method_id_index();
    let Some(method) = call
        .arg(method_id_index)
        .and_then(|value| value.method_identity())
        .cloned()
    else {
        debug!("method id without identity; binding={:?}", spec.binding);
        return call.fallback(spec.returns);
    };
    let full_signature = method.full_signature();
    debug!(
        "invoke {full_signature} binding={:?} convention={:?}",
        spec.binding, spec.convention
    );

    let provenance = match spec.binding {
        Binding::Instance | Binding::Nonvirtual => Provenance::FromReflectionCall,
        Binding::Static => Provenance::FromClassStatic,
    };
    let mut returned = match parse_method_signature(&method.signature) {
        Ok(signature) => {
            let supplied = call
                .args
                .len()
                .saturating_sub(spec.binding.first_java_argument());
            if supplied != signature.arg_count {
                debug!(
                    "{full_signature} takes {} arguments, call supplied {supplied}",
                    signature.arg_count
                );
            }
            construct_annotation(&signature.returns, provenance)
        }
        Err(err) => {
            warn!("cannot type return of {full_signature}: {err}");
            None
        }
    };

    let classification = call.oracle.classify(&full_signature);
    if let Some(taint) = returned.as_mut().and_then(Annotation::taint_mut) {
        match &classification {
            TaintClass::Source { categories } => {
                taint.absorb(&TaintInfo::tainted(TaintSourceKind::Api, categories.iter().cloned()));
            }
            TaintClass::NotClassified | TaintClass::Sink { .. } => {
                if let Some(inherited) = inherited_taint(call, spec.binding) {
                    taint.absorb(&inherited);
                }
            }
        }
    }

    let first_java = spec.binding.first_java_argument().min(call.args.len());
    let (head, arguments) = call.args.split_at_mut(first_java);
    let receiver = match spec.binding {
        Binding::Instance | Binding::Nonvirtual => head.first_mut(),
        Binding::Static => None,
    };
    let mut invocation = Invocation {
        method: &method,
        full_signature: &full_signature,
        classification: &classification,
        binding: spec.binding,
        receiver,
        arguments,
        returned: returned.as_mut(),
    };
    for observer in all_observers() {
        observer.observe(&mut invocation, call.findings);
    }

    let mut outcome = call.fresh(spec.returns);
    if let (CallOutcome::Return(value), Some(annotation)) = (&mut outcome, returned) {
        value.annotate(annotation);
    }
    outcome
}

/// Receiver taint, else the first tainted field of the receiver (or of the class for statics).
fn inherited_taint(call: &Call<'_>, binding: Binding) -> Option<TaintInfo> {
    let target = call.arg(0)?;
    match binding {
        Binding::Instance | Binding::Nonvirtual => {
            let receiver = target.object_identity()?;
            if receiver.taint.is_tainted {
                return Some(receiver.taint.clone());
            }
            receiver.fields.first_tainted().cloned()
        }
        Binding::Static => target.class_identity()?.fields.first_tainted().cloned(),
    }
}
