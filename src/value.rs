use std::mem;

use crate::annotation::{
    Annotation, ClassIdentity, FieldIdentity, MethodIdentity, ObjectIdentity, PrimitiveValue,
    StringLiteral, TaintInfo,
};

/// Abstract native value: an opaque handle plus at most one annotation per variant.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Value {
    pub(crate) handle: u64,
    pub(crate) bits: u32,
    annotations: Vec<Annotation>,
}

macro_rules! typed_accessor {
    ($get:ident, $variant:ident, $ty:ty) => {
        pub(crate) fn $get(&self) -> Option<&$ty> {
            self.annotations.iter().find_map(|annotation| match annotation {
                Annotation::$variant(inner) => Some(inner),
                _ => None,
            })
        }
    };
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        typed_accessor!($get, $variant, $ty);

        pub(crate) fn $get_mut(&mut self) -> Option<&mut $ty> {
            self.annotations.iter_mut().find_map(|annotation| match annotation {
                Annotation::$variant(inner) => Some(inner),
                _ => None,
            })
        }
    };
}

impl Value {
    /// Handle of unknown provenance.
    pub(crate) fn unannotated(handle: u64, bits: u32) -> Self {
        Self {
            handle,
            bits,
            annotations: Vec::new(),
        }
    }

    pub(crate) fn with(mut self, annotation: Annotation) -> Self {
        self.annotate(annotation);
        self
    }

    /// Attach an annotation, replacing one of the same variant.
    pub(crate) fn annotate(&mut self, annotation: Annotation) {
        let kind = mem::discriminant(&annotation);
        if let Some(slot) = self
            .annotations
            .iter_mut()
            .find(|existing| mem::discriminant(*existing) == kind)
        {
            *slot = annotation;
            return;
        }
        self.annotations.push(annotation);
    }

    pub(crate) fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[cfg(test)]
    pub(crate) fn is_unannotated(&self) -> bool {
        self.annotations.is_empty()
    }

    typed_accessor!(class_identity, class_identity_mut, Class, ClassIdentity);
    typed_accessor!(object_identity, object_identity_mut, Object, ObjectIdentity);
    typed_accessor!(string_literal, String, StringLiteral);
    typed_accessor!(method_identity, Method, MethodIdentity);
    typed_accessor!(field_identity, Field, FieldIdentity);
    typed_accessor!(primitive, Primitive, PrimitiveValue);

    /// Taint of the object or primitive annotation.
    pub(crate) fn taint(&self) -> Option<&TaintInfo> {
        self.object_identity()
            .map(|object| &object.taint)
            .or_else(|| self.primitive().map(|primitive| &primitive.taint))
    }

    #[cfg(test)]
    pub(crate) fn is_tainted(&self) -> bool {
        self.taint().is_some_and(|taint| taint.is_tainted)
    }

    /// Annotation describing this value when stored into a field or ICC extra.
    pub(crate) fn payload(&self) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| matches!(annotation, Annotation::Object(_)))
            .or_else(|| {
                self.annotations
                    .iter()
                    .find(|annotation| matches!(annotation, Annotation::String(_)))
            })
            .or_else(|| {
                self.annotations
                    .iter()
                    .find(|annotation| matches!(annotation, Annotation::Primitive(_)))
            })
    }
}
