use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::signature::{JniType, TypeSig};

/// Internal name of the class whose identities carry ICC state.
pub(crate) const INTENT_CLASS: &str = "android/content/Intent";

/// Category attached to taint synthesized by field reads and ICC extras.
pub(crate) const SENSITIVE_INFO: &str = "SENSITIVE_INFO";

/// Where the value described by an annotation was first observed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Provenance {
    FromNative,
    FromArgument,
    FromReflectionCall,
    FromObjectField,
    FromClassField,
    FromClassStatic,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum TaintSourceKind {
    Api,
    Argument,
    ArgumentField,
    ClassField,
}

/// Monotone taint record. Flags are only ever raised.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct TaintInfo {
    pub(crate) is_tainted: bool,
    pub(crate) source_kind: Option<TaintSourceKind>,
    pub(crate) categories: BTreeSet<String>,
}

impl TaintInfo {
    pub(crate) fn tainted<I, S>(kind: TaintSourceKind, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_tainted: true,
            source_kind: Some(kind),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Merge another record into this one: OR of flags, first known kind, union of categories.
    pub(crate) fn absorb(&mut self, other: &TaintInfo) {
        if !other.is_tainted {
            return;
        }
        self.is_tainted = true;
        if self.source_kind.is_none() {
            self.source_kind = other.source_kind;
        }
        self.categories.extend(other.categories.iter().cloned());
    }
}

/// One stored field value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct FieldEntry {
    pub(crate) name: String,
    /// Java-level name of the declared type (`int`, `java/lang/String`).
    pub(crate) declared_type: String,
    pub(crate) value: Annotation,
}

/// Insertion-ordered field values keyed by `(name, declared_type)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct FieldTable {
    entries: Vec<FieldEntry>,
}

impl FieldTable {
    pub(crate) fn get(&self, name: &str, declared_type: &str) -> Option<&Annotation> {
        self.entries
            .iter()
            .find(|entry| entry.name == name && entry.declared_type == declared_type)
            .map(|entry| &entry.value)
    }

    /// Overwrite the row for the key, or append a new one.
    pub(crate) fn upsert(&mut self, name: &str, declared_type: &str, value: Annotation) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name && entry.declared_type == declared_type)
        {
            entry.value = value;
            return;
        }
        self.entries.push(FieldEntry {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            value,
        });
    }

    /// Taint of the first tainted row in insertion order.
    pub(crate) fn first_tainted(&self) -> Option<&TaintInfo> {
        self.entries
            .iter()
            .filter_map(|entry| entry.value.taint())
            .find(|taint| taint.is_tainted)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inter-component communication state of an `Intent` identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct IccInfo {
    pub(crate) is_icc: bool,
    pub(crate) activity_name: Option<String>,
    pub(crate) extras: BTreeMap<String, Option<Annotation>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ClassIdentity {
    pub(crate) class_name: String,
    pub(crate) fields: FieldTable,
}

impl ClassIdentity {
    pub(crate) fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: FieldTable::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ObjectIdentity {
    pub(crate) source: Provenance,
    pub(crate) java_type: String,
    pub(crate) fields: FieldTable,
    pub(crate) taint: TaintInfo,
    pub(crate) icc: Option<IccInfo>,
}

impl ObjectIdentity {
    pub(crate) fn new(source: Provenance, java_type: impl Into<String>) -> Self {
        let java_type = java_type.into();
        let icc = (java_type == INTENT_CLASS).then(IccInfo::default);
        Self {
            source,
            java_type,
            fields: FieldTable::default(),
            taint: TaintInfo::default(),
            icc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct StringLiteral {
    pub(crate) source: Provenance,
    pub(crate) value: String,
}

/// Class name recorded for member ids looked up on a class with no identity.
pub(crate) const UNKNOWN_CLASS: &str = "<unknown>";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct MethodIdentity {
    pub(crate) class_name: String,
    pub(crate) method_name: String,
    pub(crate) signature: String,
}

impl MethodIdentity {
    /// Catalog key, e.g. `Landroid/content/Intent;.getStringExtra:(Ljava/lang/String;)Ljava/lang/String;`.
    pub(crate) fn full_signature(&self) -> String {
        format!(
            "L{};.{}:{}",
            self.class_name, self.method_name, self.signature
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct FieldIdentity {
    pub(crate) class_name: String,
    pub(crate) field_name: String,
    pub(crate) signature: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct PrimitiveValue {
    pub(crate) source: Provenance,
    pub(crate) java_type: String,
    pub(crate) taint: TaintInfo,
}

/// Java-level metadata attached to a native value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Annotation {
    Class(ClassIdentity),
    Object(ObjectIdentity),
    String(StringLiteral),
    Method(MethodIdentity),
    Field(FieldIdentity),
    Primitive(PrimitiveValue),
}

impl Annotation {
    pub(crate) fn taint(&self) -> Option<&TaintInfo> {
        match self {
            Annotation::Object(object) => Some(&object.taint),
            Annotation::Primitive(primitive) => Some(&primitive.taint),
            Annotation::Class(_)
            | Annotation::String(_)
            | Annotation::Method(_)
            | Annotation::Field(_) => None,
        }
    }

    pub(crate) fn taint_mut(&mut self) -> Option<&mut TaintInfo> {
        match self {
            Annotation::Object(object) => Some(&mut object.taint),
            Annotation::Primitive(primitive) => Some(&mut primitive.taint),
            Annotation::Class(_)
            | Annotation::String(_)
            | Annotation::Method(_)
            | Annotation::Field(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_tainted(&self) -> bool {
        self.taint().is_some_and(|taint| taint.is_tainted)
    }

    pub(crate) fn as_object_mut(&mut self) -> Option<&mut ObjectIdentity> {
        match self {
            Annotation::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Default annotation of a freshly produced value of the given type.
pub(crate) fn construct_annotation(ty: &TypeSig, source: Provenance) -> Option<Annotation> {
    match ty.category {
        JniType::Object | JniType::Array => Some(Annotation::Object(ObjectIdentity::new(
            source,
            ty.java_type.clone(),
        ))),
        JniType::String => Some(Annotation::Object(ObjectIdentity::new(
            source,
            "java/lang/String",
        ))),
        JniType::Boolean
        | JniType::Byte
        | JniType::Char
        | JniType::Short
        | JniType::Int
        | JniType::Long
        | JniType::Float
        | JniType::Double => Some(Annotation::Primitive(PrimitiveValue {
            source,
            java_type: ty.java_type.clone(),
            taint: TaintInfo::default(),
        })),
        JniType::Void | JniType::Unknown => None,
    }
}
