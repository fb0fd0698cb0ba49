use tracing::debug;

use crate::annotation::{Annotation, ObjectIdentity, Provenance, StringLiteral};
use crate::signature::JniType;

use super::{Call, CallOutcome};

/// Upper bound on UTF-16 units decoded by `NewString`.
const MAX_UTF16_UNITS: u64 = 1 << 16;

/// `NewStringUTF(bytes)`.
pub(super) fn new_string_utf(call: &mut Call<'_>) -> CallOutcome {
    let Some(text) = call.c_string_arg(0) else {
        debug!("NewStringUTF buffer is unreadable");
        return call.fallback(JniType::String);
    };
    debug!("string: {text}");
    let value = call
        .fresh_value(JniType::String)
        .with(Annotation::String(StringLiteral {
            source: Provenance::FromNative,
            value: text,
        }));
    CallOutcome::Return(value)
}

/// `NewString(unicodeChars, len)`: UTF-16LE decode when the buffer is readable.
pub(super) fn new_string(call: &mut Call<'_>) -> CallOutcome {
    let decoded = match (call.arg(0), call.arg(1)) {
        (Some(chars), Some(len)) if len.handle <= MAX_UTF16_UNITS => call
            .host
            .read_bytes(chars.handle, (len.handle * 2) as usize)
            .map(|bytes| {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }),
        _ => None,
    };
    let mut value = call.fresh_value(JniType::String);
    match decoded {
        Some(text) => value.annotate(Annotation::String(StringLiteral {
            source: Provenance::FromNative,
            value: text,
        })),
        None => call.mark_fallback(),
    }
    CallOutcome::Return(value)
}

/// `Get[StringUTF|String]Chars`, `Get<Type>ArrayElements` and the critical variants.
pub(super) fn alias_argument(call: &mut Call<'_>) -> CallOutcome {
    match call.arg(0) {
        Some(storage) => CallOutcome::Return(storage.clone()),
        None => call.fallback(JniType::Object),
    }
}

/// `NewObjectArray(length, elementClass, initialElement)`.
pub(super) fn new_object_array(call: &mut Call<'_>) -> CallOutcome {
    let element = call
        .arg(1)
        .and_then(|class| class.class_identity())
        .map(|class| class.class_name.clone())
        .unwrap_or_else(|| "java/lang/Object".to_string());
    let array_type = if element.starts_with('[') {
        format!("[{element}")
    } else {
        format!("[L{element};")
    };
    let value = call
        .fresh_value(JniType::Array)
        .with(Annotation::Object(ObjectIdentity::new(
            Provenance::FromNative,
            array_type,
        )));
    CallOutcome::Return(value)
}

/// `New<Type>Array(length)`.
pub(super) fn new_primitive_array(call: &mut Call<'_>, element: JniType) -> CallOutcome {
    let Some(tag) = element.descriptor_tag() else {
        return call.fallback(JniType::Array);
    };
    let value = call
        .fresh_value(JniType::Array)
        .with(Annotation::Object(ObjectIdentity::new(
            Provenance::FromNative,
            format!("[{tag}"),
        )));
    CallOutcome::Return(value)
}

/// `GetObjectArrayElement(array, index)`: element identity inheriting the array's taint.
pub(super) fn get_object_array_element(call: &mut Call<'_>) -> CallOutcome {
    let Some(array) = call.arg(0).and_then(|array| array.object_identity()) else {
        return call.fallback(JniType::Object);
    };
    let element_type = element_type(&array.java_type);
    let mut element = ObjectIdentity::new(array.source, element_type);
    element.taint.absorb(&array.taint);
    let value = call
        .fresh_value(JniType::Object)
        .with(Annotation::Object(element));
    CallOutcome::Return(value)
}

fn element_type(array_type: &str) -> String {
    let Some(element) = array_type.strip_prefix('[') else {
        return "java/lang/Object".to_string();
    };
    element
        .strip_prefix('L')
        .and_then(|class| class.strip_suffix(';'))
        .unwrap_or(element)
        .to_string()
}
