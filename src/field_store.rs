use crate::annotation::{
    Annotation, ClassIdentity, FieldTable, ObjectIdentity, Provenance, SENSITIVE_INFO, TaintInfo,
    TaintSourceKind, construct_annotation,
};
use crate::signature::TypeSig;

/// Identity whose field table a read or write goes through.
pub(crate) enum FieldOwner<'a> {
    Object(&'a mut ObjectIdentity),
    Class(&'a mut ClassIdentity),
}

impl FieldOwner<'_> {
    fn fields(&self) -> &FieldTable {
        match self {
            FieldOwner::Object(object) => &object.fields,
            FieldOwner::Class(class) => &class.fields,
        }
    }

    fn fields_mut(&mut self) -> &mut FieldTable {
        match self {
            FieldOwner::Object(object) => &mut object.fields,
            FieldOwner::Class(class) => &mut class.fields,
        }
    }

    /// Taint a synthesized field value inherits from its owner.
    fn miss_taint(&self) -> (Provenance, TaintInfo) {
        match self {
            FieldOwner::Object(object) => {
                let mut taint = if object.source == Provenance::FromArgument {
                    TaintInfo::tainted(TaintSourceKind::ArgumentField, [SENSITIVE_INFO])
                } else {
                    TaintInfo::default()
                };
                taint.absorb(&object.taint);
                (Provenance::FromObjectField, taint)
            }
            FieldOwner::Class(_) => (
                Provenance::FromClassField,
                TaintInfo::tainted(TaintSourceKind::ClassField, [SENSITIVE_INFO]),
            ),
        }
    }
}

/// Read a field, synthesizing and storing a value on a miss.
///
/// Rows are keyed by the field name and the Java-level name of its type.
pub(crate) fn get_field(
    owner: &mut FieldOwner<'_>,
    name: &str,
    field_type: &TypeSig,
) -> Option<Annotation> {
    if let Some(existing) = owner.fields().get(name, &field_type.java_type) {
        return Some(existing.clone());
    }
    let (source, taint) = owner.miss_taint();
    let mut annotation = construct_annotation(field_type, source)?;
    if let Some(slot) = annotation.taint_mut() {
        slot.absorb(&taint);
    }
    owner
        .fields_mut()
        .upsert(name, &field_type.java_type, annotation.clone());
    Some(annotation)
}

/// Store a deep copy of `value` as the field's current value.
pub(crate) fn set_field(
    owner: &mut FieldOwner<'_>,
    name: &str,
    field_type: &TypeSig,
    value: &Annotation,
) {
    owner
        .fields_mut()
        .upsert(name, &field_type.java_type, value.clone());
}
