use tracing::{debug, info};

use crate::annotation::{Annotation, ClassIdentity, ObjectIdentity, Provenance, TaintInfo};
use crate::signature::JniType;
use crate::value::Value;

use super::{Call, CallOutcome};

/// `FindClass(name)` and `DefineClass(name, loader, buf, len)`.
pub(super) fn find_class(call: &mut Call<'_>) -> CallOutcome {
    let Some(class_name) = call.c_string_arg(0) else {
        debug!("class name is unreadable");
        return call.fallback(JniType::Object);
    };
    info!("class: {class_name}");
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Class(ClassIdentity::new(class_name)));
    CallOutcome::Return(value)
}

/// `GetObjectClass(obj)`: inverse of `AllocObject`/`NewObject`.
pub(super) fn get_object_class(call: &mut Call<'_>) -> CallOutcome {
    let class_name = call.arg(0).and_then(|object| {
        object
            .object_identity()
            .map(|identity| identity.java_type.clone())
            .or_else(|| {
                object
                    .string_literal()
                    .map(|_| "java/lang/String".to_string())
            })
    });
    let Some(class_name) = class_name else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Class(ClassIdentity::new(class_name)));
    CallOutcome::Return(value)
}

/// `AllocObject(clazz)`.
pub(super) fn alloc_object(call: &mut Call<'_>) -> CallOutcome {
    let Some(class_name) = class_name_arg(call, 0) else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Object(ObjectIdentity::new(
            Provenance::FromNative,
            class_name,
        )));
    CallOutcome::Return(value)
}

/// `NewObject(clazz, methodID, args..)`; tainted constructor arguments taint the object.
pub(super) fn new_object(call: &mut Call<'_>) -> CallOutcome {
    let Some(class_name) = class_name_arg(call, 0) else {
        return call.fallback(JniType::Object);
    };
    let mut identity = ObjectIdentity::new(Provenance::FromNative, class_name);
    let mut taint = TaintInfo::default();
    for argument in call.args.iter().skip(2) {
        if let Some(argument_taint) = argument.taint() {
            taint.absorb(argument_taint);
        }
    }
    identity.taint.absorb(&taint);
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Object(identity));
    CallOutcome::Return(value)
}

/// `NewGlobalRef`, `NewLocalRef`, `NewWeakGlobalRef`, `PopLocalFrame`.
pub(super) fn forward_reference(call: &mut Call<'_>) -> CallOutcome {
    let mut value = call.fresh_value(JniType::Object);
    if let Some(referent) = call.arg(0) {
        for annotation in referent.annotations() {
            value.annotate(annotation.clone());
        }
    }
    CallOutcome::Return(value)
}

fn class_name_arg(call: &Call<'_>, index: usize) -> Option<String> {
    call.arg(index)
        .and_then(Value::class_identity)
        .map(|class| class.class_name.clone())
}
