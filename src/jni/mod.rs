//! Dispatch table over the 233 `JNINativeInterface` slots.

mod fields;
mod invoke;
mod lifecycle;
pub(crate) mod natives;
mod reflection;
pub(crate) mod slots;
mod strings;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::host::Host;
use crate::observers::Finding;
use crate::signature::JniType;
use crate::taint_catalog::TaintOracle;
use crate::value::Value;

use self::natives::NativeRegistry;
use self::slots::SLOTS;

/// How a `Call*Method*` symbol binds its target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) enum Binding {
    /// `[obj, methodID, args..]`
    Instance,
    /// `[obj, clazz, methodID, args..]`
    Nonvirtual,
    /// `[clazz, methodID, args..]`
    Static,
}

impl Binding {
    fn method_id_index(self) -> usize {
        match self {
            Binding::Instance | Binding::Static => 1,
            Binding::Nonvirtual => 2,
        }
    }

    fn first_java_argument(self) -> usize {
        self.method_id_index() + 1
    }
}

/// Argument passing convention; it never changes semantics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) enum Convention {
    Variadic,
    VaList,
    Array,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct InvokeSpec {
    pub(crate) returns: JniType,
    pub(crate) binding: Binding,
    pub(crate) convention: Convention,
}

/// `[owner, fieldID(, value)]`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct FieldAccess {
    pub(crate) ty: JniType,
    pub(crate) is_static: bool,
}

/// Semantic family of a JNI function.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Handler {
    Reserved,
    /// Fresh unannotated value of the given category, or nothing for `Void`.
    Unconstrained(JniType),
    FindClass,
    DefineClass,
    GetObjectClass,
    GetSuperclass,
    AllocObject,
    NewObject,
    /// New reference to the same Java object.
    ForwardReference,
    GetMethodId { is_static: bool },
    GetFieldId { is_static: bool },
    ToReflectedMethod,
    ToReflectedField,
    FromReflectedMethod,
    FromReflectedField,
    Invoke(InvokeSpec),
    GetField(FieldAccess),
    SetField(FieldAccess),
    NewStringUtf,
    NewString,
    /// Storage alias of the first argument.
    AliasArgument,
    Length,
    NewObjectArray,
    NewPrimitiveArray(JniType),
    GetObjectArrayElement,
    RegisterNatives,
    UnregisterNatives,
}

/// One slot of the function table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JniFunction {
    pub(crate) slot: usize,
    pub(crate) name: &'static str,
    pub(crate) symbol: Option<&'static str>,
    pub(crate) handler: Handler,
}

/// The only fault that crosses the handler boundary.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub(crate) enum JniFault {
    #[error("reserved JNI slot {slot} was invoked")]
    ReservedSlot { slot: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CallOutcome {
    Return(Value),
    Void,
}

impl CallOutcome {
    pub(crate) fn value(&self) -> Option<&Value> {
        match self {
            CallOutcome::Return(value) => Some(value),
            CallOutcome::Void => None,
        }
    }

    pub(crate) fn into_value(self) -> Option<Value> {
        match self {
            CallOutcome::Return(value) => Some(value),
            CallOutcome::Void => None,
        }
    }
}

/// Everything a handler may read or mutate during one JNI call.
pub(crate) struct Call<'a> {
    pub(crate) host: &'a mut dyn Host,
    /// Arguments after the `JNIEnv*`, normalized to the variadic layout.
    pub(crate) args: &'a mut [Value],
    pub(crate) oracle: &'a TaintOracle,
    pub(crate) natives: &'a mut NativeRegistry,
    pub(crate) findings: &'a mut Vec<Finding>,
    fallback: bool,
}

impl<'a> Call<'a> {
    pub(crate) fn new(
        host: &'a mut dyn Host,
        args: &'a mut [Value],
        oracle: &'a TaintOracle,
        natives: &'a mut NativeRegistry,
        findings: &'a mut Vec<Finding>,
    ) -> Self {
        Self {
            host,
            args,
            oracle,
            natives,
            findings,
            fallback: false,
        }
    }

    pub(crate) fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Whether the handler fell back to an unconstrained result.
    pub(crate) fn fell_back(&self) -> bool {
        self.fallback
    }

    fn mark_fallback(&mut self) {
        self.fallback = true;
    }

    fn pointer_bits(&self) -> u32 {
        self.host.pointer_bits()
    }

    fn fresh_value(&mut self, ty: JniType) -> Value {
        let bits = ty.width(self.host.pointer_bits());
        Value::unannotated(self.host.fresh_handle(bits), bits)
    }

    fn fresh(&mut self, ty: JniType) -> CallOutcome {
        if ty == JniType::Void {
            return CallOutcome::Void;
        }
        CallOutcome::Return(self.fresh_value(ty))
    }

    /// Unannotated result used when an expected identity is missing.
    fn fallback(&mut self, ty: JniType) -> CallOutcome {
        self.mark_fallback();
        self.fresh(ty)
    }

    /// Decode the NUL-terminated string an argument points at.
    fn c_string_arg(&self, index: usize) -> Option<String> {
        let address = self.arg(index)?.handle;
        self.host.read_c_string(address)
    }
}

/// Run the handler of `function` against one call.
pub(crate) fn dispatch(function: &JniFunction, call: &mut Call<'_>) -> Result<CallOutcome, JniFault> {
    let outcome = match function.handler {
        Handler::Reserved => return Err(JniFault::ReservedSlot { slot: function.slot }),
        Handler::Unconstrained(ty) => call.fallback(ty),
        Handler::FindClass | Handler::DefineClass => lifecycle::find_class(call),
        Handler::GetObjectClass => lifecycle::get_object_class(call),
        Handler::GetSuperclass => call.fresh(JniType::Object),
        Handler::AllocObject => lifecycle::alloc_object(call),
        Handler::NewObject => lifecycle::new_object(call),
        Handler::ForwardReference => lifecycle::forward_reference(call),
        Handler::GetMethodId { is_static } => reflection::get_method_id(call, is_static),
        Handler::GetFieldId { is_static } => reflection::get_field_id(call, is_static),
        Handler::ToReflectedMethod => reflection::to_reflected_method(call),
        Handler::ToReflectedField => reflection::to_reflected_field(call),
        Handler::FromReflectedMethod => reflection::from_reflected_method(call),
        Handler::FromReflectedField => reflection::from_reflected_field(call),
        Handler::Invoke(spec) => invoke::invoke(call, spec),
        Handler::GetField(access) => fields::get(call, access),
        Handler::SetField(access) => fields::set(call, access),
        Handler::NewStringUtf => strings::new_string_utf(call),
        Handler::NewString => strings::new_string(call),
        Handler::AliasArgument => strings::alias_argument(call),
        Handler::Length => call.fresh(JniType::Int),
        Handler::NewObjectArray => strings::new_object_array(call),
        Handler::NewPrimitiveArray(element) => strings::new_primitive_array(call, element),
        Handler::GetObjectArrayElement => strings::get_object_array_element(call),
        Handler::RegisterNatives => natives::register_natives(call),
        Handler::UnregisterNatives => natives::unregister_natives(call),
    };
    Ok(outcome)
}

struct Table {
    functions: Vec<JniFunction>,
    by_name: BTreeMap<&'static str, usize>,
    by_symbol: BTreeMap<&'static str, usize>,
}

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| {
        let functions: Vec<JniFunction> = SLOTS
            .iter()
            .enumerate()
            .map(|(slot, (name, symbol))| JniFunction {
                slot,
                name: *name,
                symbol: *symbol,
                handler: classify(name),
            })
            .collect();
        let by_name = functions
            .iter()
            .map(|function| (function.name, function.slot))
            .collect();
        let by_symbol = functions
            .iter()
            .filter_map(|function| function.symbol.map(|symbol| (symbol, function.slot)))
            .collect();
        Table {
            functions,
            by_name,
            by_symbol,
        }
    })
}

#[cfg(test)]
pub(crate) fn all_functions() -> &'static [JniFunction] {
    &table().functions
}

pub(crate) fn jni_function(slot: usize) -> Option<&'static JniFunction> {
    table().functions.get(slot)
}

pub(crate) fn jni_function_by_name(name: &str) -> Option<&'static JniFunction> {
    let table = table();
    let name = if name == "GetSuperClass" {
        "GetSuperclass"
    } else {
        name
    };
    table
        .by_name
        .get(name)
        .and_then(|slot| table.functions.get(*slot))
}

pub(crate) fn jni_function_by_symbol(symbol: &str) -> Option<&'static JniFunction> {
    let table = table();
    table
        .by_symbol
        .get(symbol)
        .and_then(|slot| table.functions.get(*slot))
}

fn classify(name: &str) -> Handler {
    if let Some(handler) = classify_invoke(name)
        .or_else(|| classify_field_access(name))
        .or_else(|| classify_array(name))
    {
        return handler;
    }
    match name {
        "reserved0" | "reserved1" | "reserved2" | "reserved3" => Handler::Reserved,
        "FindClass" => Handler::FindClass,
        "DefineClass" => Handler::DefineClass,
        "GetObjectClass" => Handler::GetObjectClass,
        "GetSuperclass" => Handler::GetSuperclass,
        "AllocObject" => Handler::AllocObject,
        "NewObject" | "NewObjectV" | "NewObjectA" => Handler::NewObject,
        "NewGlobalRef" | "NewLocalRef" | "NewWeakGlobalRef" | "PopLocalFrame" => {
            Handler::ForwardReference
        }
        "GetMethodID" => Handler::GetMethodId { is_static: false },
        "GetStaticMethodID" => Handler::GetMethodId { is_static: true },
        "GetFieldID" => Handler::GetFieldId { is_static: false },
        "GetStaticFieldID" => Handler::GetFieldId { is_static: true },
        "ToReflectedMethod" => Handler::ToReflectedMethod,
        "ToReflectedField" => Handler::ToReflectedField,
        "FromReflectedMethod" => Handler::FromReflectedMethod,
        "FromReflectedField" => Handler::FromReflectedField,
        "NewStringUTF" => Handler::NewStringUtf,
        "NewString" => Handler::NewString,
        "GetStringChars" | "GetStringUTFChars" | "GetStringCritical"
        | "GetPrimitiveArrayCritical" => Handler::AliasArgument,
        "GetStringLength" | "GetStringUTFLength" | "GetArrayLength" => Handler::Length,
        "NewObjectArray" => Handler::NewObjectArray,
        "GetObjectArrayElement" => Handler::GetObjectArrayElement,
        "RegisterNatives" => Handler::RegisterNatives,
        "UnregisterNatives" => Handler::UnregisterNatives,
        "GetVersion" | "Throw" | "ThrowNew" | "PushLocalFrame" | "EnsureLocalCapacity"
        | "MonitorEnter" | "MonitorExit" | "GetJavaVM" | "GetObjectRefType" => {
            Handler::Unconstrained(JniType::Int)
        }
        "IsAssignableFrom" | "IsSameObject" | "IsInstanceOf" | "ExceptionCheck" => {
            Handler::Unconstrained(JniType::Boolean)
        }
        "ExceptionOccurred" | "NewDirectByteBuffer" | "GetDirectBufferAddress" => {
            Handler::Unconstrained(JniType::Object)
        }
        "GetDirectBufferCapacity" => Handler::Unconstrained(JniType::Long),
        "ExceptionDescribe" | "ExceptionClear" | "FatalError" | "DeleteGlobalRef"
        | "DeleteLocalRef" | "DeleteWeakGlobalRef" | "ReleaseStringChars"
        | "ReleaseStringUTFChars" | "SetObjectArrayElement" | "GetStringRegion"
        | "GetStringUTFRegion" | "ReleasePrimitiveArrayCritical" | "ReleaseStringCritical" => {
            Handler::Unconstrained(JniType::Void)
        }
        _ => Handler::Unconstrained(JniType::Unknown),
    }
}

fn classify_invoke(name: &str) -> Option<Handler> {
    let rest = name.strip_prefix("Call")?;
    let (binding, rest) = if let Some(rest) = rest.strip_prefix("Nonvirtual") {
        (Binding::Nonvirtual, rest)
    } else if let Some(rest) = rest.strip_prefix("Static") {
        (Binding::Static, rest)
    } else {
        (Binding::Instance, rest)
    };
    let (returns, convention) = if let Some(ty) = rest.strip_suffix("MethodV") {
        (ty, Convention::VaList)
    } else if let Some(ty) = rest.strip_suffix("MethodA") {
        (ty, Convention::Array)
    } else {
        (rest.strip_suffix("Method")?, Convention::Variadic)
    };
    Some(Handler::Invoke(InvokeSpec {
        returns: JniType::from_call_suffix(returns)?,
        binding,
        convention,
    }))
}

fn classify_field_access(name: &str) -> Option<Handler> {
    let (is_set, rest) = match name.strip_prefix("Get") {
        Some(rest) => (false, rest),
        None => (true, name.strip_prefix("Set")?),
    };
    let (is_static, rest) = match rest.strip_prefix("Static") {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let ty = JniType::from_call_suffix(rest.strip_suffix("Field")?)?;
    if ty == JniType::Void {
        return None;
    }
    let access = FieldAccess { ty, is_static };
    Some(if is_set {
        Handler::SetField(access)
    } else {
        Handler::GetField(access)
    })
}

fn classify_array(name: &str) -> Option<Handler> {
    let primitive = |ty: &str| JniType::from_call_suffix(ty).filter(|ty| ty.is_primitive());
    if let Some(ty) = name
        .strip_prefix("New")
        .and_then(|rest| rest.strip_suffix("Array"))
    {
        return primitive(ty).map(Handler::NewPrimitiveArray);
    }
    if let Some(ty) = name
        .strip_prefix("Get")
        .and_then(|rest| rest.strip_suffix("ArrayElements"))
    {
        return primitive(ty).map(|_| Handler::AliasArgument);
    }
    let region = name
        .strip_prefix("Release")
        .and_then(|rest| rest.strip_suffix("ArrayElements"))
        .or_else(|| {
            name.strip_prefix("Get")
                .or_else(|| name.strip_prefix("Set"))
                .and_then(|rest| rest.strip_suffix("ArrayRegion"))
        })?;
    primitive(region).map(|_| Handler::Unconstrained(JniType::Void))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jni::slots::SLOT_COUNT;

    #[test]
    fn every_slot_is_bound() {
        let functions = all_functions();
        assert_eq!(functions.len(), SLOT_COUNT);
        for (slot, function) in functions.iter().enumerate() {
            assert_eq!(function.slot, slot);
            assert_ne!(
                function.handler,
                Handler::Unconstrained(JniType::Unknown),
                "{} has no classification",
                function.name
            );
        }
        let reserved: Vec<_> = functions
            .iter()
            .filter(|function| function.handler == Handler::Reserved)
            .map(|function| function.slot)
            .collect();
        assert_eq!(reserved, vec![0, 1, 2, 3]);
        assert!(functions[4..].iter().all(|function| function.symbol.is_some()));
    }

    #[test]
    fn name_slot_and_symbol_resolve_to_the_same_function() {
        for function in all_functions() {
            let by_slot = jni_function(function.slot).expect("slot");
            let by_name = jni_function_by_name(function.name).expect("name");
            assert!(std::ptr::eq(by_slot, by_name));
            if let Some(symbol) = function.symbol {
                let by_symbol = jni_function_by_symbol(symbol).expect("symbol");
                assert!(std::ptr::eq(by_slot, by_symbol));
            }
        }
        assert!(jni_function(SLOT_COUNT).is_none());
        assert!(jni_function_by_name("NoSuchFunction").is_none());
    }

    #[test]
    fn superclass_lookup_accepts_both_spellings() {
        let exact = jni_function_by_name("GetSuperclass").expect("GetSuperclass");
        let legacy = jni_function_by_name("GetSuperClass").expect("GetSuperClass");
        assert_eq!(exact.slot, 10);
        assert!(std::ptr::eq(exact, legacy));
    }

    #[test]
    fn call_symbols_collapse_into_invoke_specs() {
        let invokes = all_functions()
            .iter()
            .filter(|function| matches!(function.handler, Handler::Invoke(_)))
            .count();
        assert_eq!(invokes, 90);
        assert_eq!(
            jni_function_by_name("CallNonvirtualIntMethodA")
                .expect("function")
                .handler,
            Handler::Invoke(InvokeSpec {
                returns: JniType::Int,
                binding: Binding::Nonvirtual,
                convention: Convention::Array,
            })
        );
        assert_eq!(
            jni_function_by_name("CallStaticVoidMethodV")
                .expect("function")
                .handler,
            Handler::Invoke(InvokeSpec {
                returns: JniType::Void,
                binding: Binding::Static,
                convention: Convention::VaList,
            })
        );
    }

    #[test]
    fn field_symbols_collapse_into_accessors() {
        let accessors = all_functions()
            .iter()
            .filter(|function| {
                matches!(function.handler, Handler::GetField(_) | Handler::SetField(_))
            })
            .count();
        assert_eq!(accessors, 36);
        assert_eq!(
            jni_function_by_name("SetStaticLongField")
                .expect("function")
                .handler,
            Handler::SetField(FieldAccess {
                ty: JniType::Long,
                is_static: true,
            })
        );
        assert_eq!(
            jni_function_by_name("GetFieldID").expect("function").handler,
            Handler::GetFieldId { is_static: false }
        );
    }

    #[test]
    fn array_symbols_are_classified() {
        let handler = |name| jni_function_by_name(name).expect("function").handler;
        assert_eq!(
            handler("NewIntArray"),
            Handler::NewPrimitiveArray(JniType::Int)
        );
        assert_eq!(handler("NewObjectArray"), Handler::NewObjectArray);
        assert_eq!(handler("GetByteArrayElements"), Handler::AliasArgument);
        assert_eq!(
            handler("ReleaseByteArrayElements"),
            Handler::Unconstrained(JniType::Void)
        );
        assert_eq!(
            handler("SetDoubleArrayRegion"),
            Handler::Unconstrained(JniType::Void)
        );
        assert_eq!(handler("GetArrayLength"), Handler::Length);
    }
}
