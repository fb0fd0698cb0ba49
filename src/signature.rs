use std::str::FromStr;

use jdescriptor::{MethodDescriptor, TypeDescriptor};
use serde::Serialize;
use thiserror::Error;

/// Value category of a JNI return slot or field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum JniType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object,
    String,
    Array,
    /// Category of a descriptor that failed to parse.
    Unknown,
}

impl JniType {
    /// Native width in bits of a value of this category.
    pub(crate) fn width(self, pointer_bits: u32) -> u32 {
        match self {
            JniType::Void => 0,
            JniType::Boolean | JniType::Byte => 8,
            JniType::Char | JniType::Short => 16,
            JniType::Int | JniType::Float => 32,
            JniType::Long | JniType::Double => 64,
            JniType::Object | JniType::String | JniType::Array | JniType::Unknown => pointer_bits,
        }
    }

    /// Map the type fragment of a JNI function name (`CallIntMethod` -> `Int`).
    pub(crate) fn from_call_suffix(suffix: &str) -> Option<JniType> {
        let ty = match suffix {
            "Void" => JniType::Void,
            "Boolean" => JniType::Boolean,
            "Byte" => JniType::Byte,
            "Char" => JniType::Char,
            "Short" => JniType::Short,
            "Int" => JniType::Int,
            "Long" => JniType::Long,
            "Float" => JniType::Float,
            "Double" => JniType::Double,
            "Object" => JniType::Object,
            _ => return None,
        };
        Some(ty)
    }

    pub(crate) fn is_primitive(self) -> bool {
        matches!(
            self,
            JniType::Boolean
                | JniType::Byte
                | JniType::Char
                | JniType::Short
                | JniType::Int
                | JniType::Long
                | JniType::Float
                | JniType::Double
        )
    }

    /// Descriptor tag of a primitive category (`Int` -> `I`).
    pub(crate) fn descriptor_tag(self) -> Option<char> {
        let tag = match self {
            JniType::Boolean => 'Z',
            JniType::Byte => 'B',
            JniType::Char => 'C',
            JniType::Short => 'S',
            JniType::Int => 'I',
            JniType::Long => 'J',
            JniType::Float => 'F',
            JniType::Double => 'D',
            _ => return None,
        };
        Some(tag)
    }

    /// Java keyword for primitive categories.
    pub(crate) fn primitive_name(self) -> Option<&'static str> {
        let name = match self {
            JniType::Boolean => "boolean",
            JniType::Byte => "byte",
            JniType::Char => "char",
            JniType::Short => "short",
            JniType::Int => "int",
            JniType::Long => "long",
            JniType::Float => "float",
            JniType::Double => "double",
            _ => return None,
        };
        Some(name)
    }
}

/// Error raised for a type descriptor that cannot be interpreted.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub(crate) enum SignatureError {
    #[error("malformed descriptor `{descriptor}`: {reason}")]
    Malformed { descriptor: String, reason: String },
    #[error("field descriptor `{0}` cannot be void")]
    VoidField(String),
}

/// Category plus Java-level type name of a descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TypeSig {
    pub(crate) category: JniType,
    /// Internal class name for references (`java/lang/String`, `[I`), keyword for primitives.
    pub(crate) java_type: String,
}

impl TypeSig {
    #[cfg(test)]
    pub(crate) fn unknown() -> Self {
        Self {
            category: JniType::Unknown,
            java_type: String::new(),
        }
    }

    /// Type of a reference value whose class is only known by name.
    pub(crate) fn reference(java_type: &str) -> Self {
        let category = if java_type == "java/lang/String" {
            JniType::String
        } else if java_type.starts_with('[') {
            JniType::Array
        } else {
            JniType::Object
        };
        Self {
            category,
            java_type: java_type.to_string(),
        }
    }
}

/// Parsed JNI method descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MethodSignature {
    pub(crate) arg_count: usize,
    pub(crate) returns: TypeSig,
}

/// Parse a JNI method descriptor such as `(ILjava/lang/String;)Ljava/lang/Object;`.
pub(crate) fn parse_method_signature(descriptor: &str) -> Result<MethodSignature, SignatureError> {
    let parsed = MethodDescriptor::from_str(descriptor).map_err(|err| SignatureError::Malformed {
        descriptor: descriptor.to_string(),
        reason: err.to_string(),
    })?;
    let tail = descriptor
        .rsplit_once(')')
        .map(|(_, tail)| tail)
        .ok_or_else(|| SignatureError::Malformed {
            descriptor: descriptor.to_string(),
            reason: "missing `)`".to_string(),
        })?;
    let returns = type_sig(descriptor, return_shape(&parsed), tail)?;
    Ok(MethodSignature {
        arg_count: parsed.parameter_types().len(),
        returns,
    })
}

/// Parse a JNI field descriptor such as `I` or `Landroid/content/Intent;`.
pub(crate) fn parse_field_type(descriptor: &str) -> Result<TypeSig, SignatureError> {
    let wrapped = format!("(){descriptor}");
    let parsed = MethodDescriptor::from_str(&wrapped).map_err(|err| SignatureError::Malformed {
        descriptor: descriptor.to_string(),
        reason: err.to_string(),
    })?;
    let sig = type_sig(descriptor, return_shape(&parsed), descriptor)?;
    if sig.category == JniType::Void {
        return Err(SignatureError::VoidField(descriptor.to_string()));
    }
    Ok(sig)
}

enum Shape {
    Void,
    Object,
    Array,
    Primitive,
}

fn return_shape(parsed: &MethodDescriptor) -> Shape {
    match parsed.return_type() {
        TypeDescriptor::Void => Shape::Void,
        TypeDescriptor::Object(_) => Shape::Object,
        TypeDescriptor::Array(_, _) => Shape::Array,
        _ => Shape::Primitive,
    }
}

fn type_sig(descriptor: &str, shape: Shape, text: &str) -> Result<TypeSig, SignatureError> {
    let sig = match shape {
        Shape::Void => TypeSig {
            category: JniType::Void,
            java_type: "void".to_string(),
        },
        Shape::Object => {
            let class = text
                .strip_prefix('L')
                .and_then(|class| class.strip_suffix(';'))
                .ok_or_else(|| SignatureError::Malformed {
                    descriptor: descriptor.to_string(),
                    reason: format!("unexpected type `{text}`"),
                })?;
            TypeSig::reference(class)
        }
        Shape::Array => TypeSig {
            category: JniType::Array,
            java_type: text.to_string(),
        },
        Shape::Primitive => {
            let category = primitive_category(text).ok_or_else(|| SignatureError::Malformed {
                descriptor: descriptor.to_string(),
                reason: format!("unexpected type `{text}`"),
            })?;
            TypeSig {
                category,
                java_type: category.primitive_name().unwrap_or_default().to_string(),
            }
        }
    };
    Ok(sig)
}

fn primitive_category(tag: &str) -> Option<JniType> {
    let ty = match tag {
        "Z" => JniType::Boolean,
        "B" => JniType::Byte,
        "C" => JniType::Char,
        "S" => JniType::Short,
        "I" => JniType::Int,
        "J" => JniType::Long,
        "F" => JniType::Float,
        "D" => JniType::Double,
        _ => return None,
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_signature_counts_every_parameter_as_one_slot() {
        let sig = parse_method_signature("(IJLjava/lang/String;[B)Ljava/lang/Object;")
            .expect("parse");
        assert_eq!(sig.arg_count, 4);
        assert_eq!(sig.returns.category, JniType::Object);
        assert_eq!(sig.returns.java_type, "java/lang/Object");
    }

    #[test]
    fn string_and_array_returns_have_their_own_categories() {
        let string = parse_method_signature("()Ljava/lang/String;").expect("parse");
        assert_eq!(string.returns.category, JniType::String);
        let array = parse_method_signature("()[I").expect("parse");
        assert_eq!(array.returns.category, JniType::Array);
        assert_eq!(array.returns.java_type, "[I");
        let void = parse_method_signature("(Landroid/content/Intent;)V").expect("parse");
        assert_eq!(void.returns.category, JniType::Void);
        assert_eq!(void.arg_count, 1);
    }

    #[test]
    fn primitive_returns_map_to_keywords() {
        let sig = parse_method_signature("(Ljava/lang/String;)Z").expect("parse");
        assert_eq!(sig.returns.category, JniType::Boolean);
        assert_eq!(sig.returns.java_type, "boolean");
        let sig = parse_method_signature("()J").expect("parse");
        assert_eq!(sig.returns.category, JniType::Long);
    }

    #[test]
    fn malformed_descriptor_is_an_error_not_an_object() {
        let err = parse_method_signature("(Ljava/lang/String").expect_err("must fail");
        assert!(matches!(err, SignatureError::Malformed { .. }));
        assert!(parse_method_signature("not a descriptor").is_err());
    }

    #[test]
    fn field_types_reject_void() {
        assert_eq!(
            parse_field_type("V"),
            Err(SignatureError::VoidField("V".to_string()))
        );
        let field = parse_field_type("Landroid/content/Intent;").expect("parse");
        assert_eq!(field.category, JniType::Object);
        assert_eq!(field.java_type, "android/content/Intent");
        assert_eq!(parse_field_type("I").expect("parse").category, JniType::Int);
    }

    #[test]
    fn widths_follow_categories() {
        assert_eq!(JniType::Boolean.width(64), 8);
        assert_eq!(JniType::Char.width(64), 16);
        assert_eq!(JniType::Float.width(64), 32);
        assert_eq!(JniType::Long.width(32), 64);
        assert_eq!(JniType::Object.width(32), 32);
        assert_eq!(JniType::Unknown.width(64), 64);
        assert_eq!(JniType::Void.width(64), 0);
    }

    #[test]
    fn call_suffixes_resolve() {
        assert_eq!(JniType::from_call_suffix("Int"), Some(JniType::Int));
        assert_eq!(JniType::from_call_suffix("Void"), Some(JniType::Void));
        assert_eq!(JniType::from_call_suffix("Integer"), None);
    }
}
