use tracing::{debug, warn};

use crate::annotation::{Provenance, construct_annotation};
use crate::field_store::{FieldOwner, get_field, set_field};
use crate::signature::{TypeSig, parse_field_type};

use super::{Call, CallOutcome, FieldAccess};

/// `Get[Static]<Type>Field(owner, fieldID)`.
pub(super) fn get(call: &mut Call<'_>, access: FieldAccess) -> CallOutcome {
    let Some((name, field_type)) = resolve(call, access) else {
        return call.fallback(access.ty);
    };
    let mut value = call.fresh_value(access.ty);
    let annotation = call
        .args
        .first_mut()
        .and_then(|owner| field_owner(owner, access.is_static))
        .and_then(|mut owner| get_field(&mut owner, &name, &field_type));
    match annotation {
        Some(annotation) => value.annotate(annotation),
        None => {
            debug!("field {name} has no owner identity");
            call.mark_fallback();
        }
    }
    CallOutcome::Return(value)
}

/// `Set[Static]<Type>Field(owner, fieldID, value)`.
pub(super) fn set(call: &mut Call<'_>, access: FieldAccess) -> CallOutcome {
    let Some((name, field_type)) = resolve(call, access) else {
        call.mark_fallback();
        return CallOutcome::Void;
    };
    let stored = call
        .arg(2)
        .and_then(|value| value.payload().cloned())
        .or_else(|| construct_annotation(&field_type, Provenance::FromNative));
    let Some(stored) = stored else {
        return CallOutcome::Void;
    };
    match call
        .args
        .first_mut()
        .and_then(|owner| field_owner(owner, access.is_static))
    {
        Some(mut owner) => set_field(&mut owner, &name, &field_type, &stored),
        None => {
            debug!("field {name} has no owner identity");
            call.mark_fallback();
        }
    }
    CallOutcome::Void
}

fn resolve(call: &Call<'_>, access: FieldAccess) -> Option<(String, TypeSig)> {
    let Some(field) = call.arg(1).and_then(|value| value.field_identity()) else {
        debug!("field id without identity; static={}", access.is_static);
        return None;
    };
    match parse_field_type(&field.signature) {
        Ok(field_type) => Some((field.field_name.clone(), field_type)),
        Err(err) => {
            warn!(
                "cannot type field {}.{}: {err}",
                field.class_name, field.field_name
            );
            None
        }
    }
}

fn field_owner(owner: &mut crate::value::Value, is_static: bool) -> Option<FieldOwner<'_>> {
    if is_static {
        owner.class_identity_mut().map(FieldOwner::Class)
    } else {
        owner.object_identity_mut().map(FieldOwner::Object)
    }
}
