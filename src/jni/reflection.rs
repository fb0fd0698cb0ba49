use tracing::{debug, info};

use crate::annotation::{
    Annotation, FieldIdentity, MethodIdentity, ObjectIdentity, Provenance, UNKNOWN_CLASS,
};
use crate::signature::JniType;

use super::{Call, CallOutcome};

const REFLECTED_METHOD: &str = "java/lang/reflect/Method";
const REFLECTED_FIELD: &str = "java/lang/reflect/Field";

/// Class name plus the two strings of `Get[Static]MethodID` / `Get[Static]FieldID`.
/// A class without identity keeps the member under [`UNKNOWN_CLASS`].
fn member_lookup(call: &Call<'_>, kind: &str, is_static: bool) -> Option<(String, String, String)> {
    let class_name = match call.arg(0).and_then(|class| class.class_identity()) {
        Some(class) => class.class_name.clone(),
        None => {
            debug!("{kind} lookup on unknown class; static={is_static}");
            UNKNOWN_CLASS.to_string()
        }
    };
    let (Some(name), Some(signature)) = (call.c_string_arg(1), call.c_string_arg(2)) else {
        debug!("{kind} lookup on {class_name} has unreadable strings");
        return None;
    };
    info!("{kind}: {class_name}.{name}{signature} static={is_static}");
    Some((class_name, name, signature))
}

pub(super) fn get_method_id(call: &mut Call<'_>, is_static: bool) -> CallOutcome {
    let Some((class_name, method_name, signature)) = member_lookup(call, "method", is_static)
    else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Method(MethodIdentity {
            class_name,
            method_name,
            signature,
        }));
    CallOutcome::Return(value)
}

pub(super) fn get_field_id(call: &mut Call<'_>, is_static: bool) -> CallOutcome {
    let Some((class_name, field_name, signature)) = member_lookup(call, "field", is_static) else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Field(FieldIdentity {
            class_name,
            field_name,
            signature,
        }));
    CallOutcome::Return(value)
}

/// `ToReflectedMethod(cls, methodID, isStatic)`.
pub(super) fn to_reflected_method(call: &mut Call<'_>) -> CallOutcome {
    let Some(method) = call.arg(1).and_then(|value| value.method_identity()).cloned() else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Object(ObjectIdentity::new(
            Provenance::FromReflectionCall,
            REFLECTED_METHOD,
        )))
        .with(Annotation::Method(method));
    CallOutcome::Return(value)
}

/// `ToReflectedField(cls, fieldID, isStatic)`.
pub(super) fn to_reflected_field(call: &mut Call<'_>) -> CallOutcome {
    let Some(field) = call.arg(1).and_then(|value| value.field_identity()).cloned() else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Object(ObjectIdentity::new(
            Provenance::FromReflectionCall,
            REFLECTED_FIELD,
        )))
        .with(Annotation::Field(field));
    CallOutcome::Return(value)
}

/// `FromReflectedMethod(method)`.
pub(super) fn from_reflected_method(call: &mut Call<'_>) -> CallOutcome {
    let Some(method) = call.arg(0).and_then(|value| value.method_identity()).cloned() else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Method(method));
    CallOutcome::Return(value)
}

/// `FromReflectedField(field)`.
pub(super) fn from_reflected_field(call: &mut Call<'_>) -> CallOutcome {
    let Some(field) = call.arg(0).and_then(|value| value.field_identity()).cloned() else {
        return call.fallback(JniType::Object);
    };
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Field(field));
    CallOutcome::Return(value)
}

#[cfg(test)]
mod tests {
    use crate::annotation::UNKNOWN_CLASS;
    use crate::test_harness::SessionHarness;

    #[test]
    fn method_ids_carry_class_name_and_descriptor() {
        let mut harness = SessionHarness::new();
        let class = harness.find_class("android/content/Intent");
        let name = harness.c_string("putExtra");
        let signature =
            harness.c_string("(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;");
        let method = harness
            .call("GetMethodID", vec![class, name, signature])
            .expect("method id");
        let identity = method.method_identity().expect("identity");
        assert_eq!(identity.class_name, "android/content/Intent");
        assert_eq!(identity.method_name, "putExtra");
        assert_eq!(
            identity.signature,
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;"
        );
    }

    #[test]
    fn member_lookup_on_unknown_class_keeps_name_and_descriptor() {
        let mut harness = SessionHarness::new();
        let name = harness.c_string("value");
        let signature = harness.c_string("I");
        let field = harness
            .call("GetStaticFieldID", vec![harness.raw(3), name, signature])
            .expect("field id");
        let identity = field.field_identity().expect("identity");
        assert_eq!(identity.class_name, UNKNOWN_CLASS);
        assert_eq!(identity.field_name, "value");
        assert_eq!(identity.signature, "I");

        let name = harness.c_string("run");
        let signature = harness.c_string("()V");
        let method = harness
            .call("GetMethodID", vec![harness.raw(3), name, signature])
            .expect("method id");
        let identity = method.method_identity().expect("identity");
        assert_eq!(identity.class_name, UNKNOWN_CLASS);
        assert_eq!(identity.method_name, "run");
        assert_eq!(identity.signature, "()V");
    }

    #[test]
    fn member_lookup_with_unreadable_strings_is_unannotated() {
        let mut harness = SessionHarness::new();
        let class = harness.find_class("com/example/Holder");
        let field = harness
            .call("GetFieldID", vec![class, harness.raw(0), harness.raw(0)])
            .expect("field id");
        assert!(field.is_unannotated());
    }

    #[test]
    fn reflection_round_trips_identities() {
        let mut harness = SessionHarness::new();
        let class = harness.find_class("com/example/Holder");
        let method = harness.method_id(&class, "run", "()V");
        let reflected = harness
            .call("ToReflectedMethod", vec![class.clone(), method.clone(), harness.raw(0)])
            .expect("reflected");
        assert_eq!(
            reflected.object_identity().map(|object| object.java_type.as_str()),
            Some("java/lang/reflect/Method")
        );
        let recovered = harness
            .call("FromReflectedMethod", vec![reflected])
            .expect("method id");
        assert_eq!(recovered.method_identity(), method.method_identity());

        let field = harness.field_id(&class, "count", "I");
        let reflected = harness
            .call("ToReflectedField", vec![class, field.clone(), harness.raw(0)])
            .expect("reflected");
        let recovered = harness
            .call("FromReflectedField", vec![reflected])
            .expect("field id");
        assert_eq!(recovered.field_identity(), field.field_identity());
    }
}
