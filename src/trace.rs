use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::annotation::{
    Annotation, ClassIdentity, ObjectIdentity, PrimitiveValue, Provenance, StringLiteral,
    TaintInfo, TaintSourceKind,
};
use crate::host::{Host, MemoryHost};
use crate::jni::{
    JniFault, JniFunction, jni_function, jni_function_by_name, jni_function_by_symbol,
};
use crate::session::{Session, SessionReport};
use crate::signature::JniType;
use crate::taint_catalog::TaintOracle;
use crate::value::Value;

fn default_pointer_bits() -> u32 {
    64
}

/// Recorded JNI call stream of one native execution path.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Trace {
    #[serde(default = "default_pointer_bits")]
    pub(crate) pointer_bits: u32,
    #[serde(default)]
    pub(crate) memory: Vec<MemoryRegion>,
    #[serde(default)]
    pub(crate) inputs: Vec<TraceInput>,
    #[serde(default)]
    pub(crate) calls: Vec<TraceCall>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct MemoryRegion {
    pub(crate) address: u64,
    #[serde(flatten)]
    pub(crate) contents: RegionContents,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegionContents {
    /// NUL-terminated on mapping.
    Utf8(String),
    Bytes(Vec<u8>),
    /// Pointer-width little-endian words.
    Words(Vec<u64>),
}

/// Value the Java caller hands to the native code.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TraceInput {
    pub(crate) name: String,
    #[serde(flatten)]
    pub(crate) value: InputValue,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum InputValue {
    Object {
        java_type: String,
        #[serde(default)]
        tainted: bool,
        #[serde(default)]
        categories: Vec<String>,
    },
    Class {
        class_name: String,
    },
    String {
        value: String,
    },
    Primitive {
        java_type: String,
        #[serde(default)]
        tainted: bool,
        #[serde(default)]
        categories: Vec<String>,
    },
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TraceCall {
    #[serde(flatten)]
    pub(crate) target: CallTarget,
    #[serde(default)]
    pub(crate) args: Vec<ArgSpec>,
    #[serde(default)]
    pub(crate) bind: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CallTarget {
    Function(String),
    Symbol(String),
    Slot(usize),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ArgSpec {
    Literal(u64),
    Ref {
        #[serde(rename = "ref")]
        name: String,
    },
    Address {
        address: u64,
    },
}

/// Call at which a trace stopped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Aborted {
    pub(crate) call_index: usize,
    pub(crate) fault: JniFault,
}

/// Result of replaying one trace.
#[derive(Clone, Debug)]
pub(crate) struct TraceOutcome {
    pub(crate) report: SessionReport,
    pub(crate) aborted: Option<Aborted>,
    pub(crate) bindings: BTreeMap<String, Value>,
}

pub(crate) fn parse_trace(text: &str) -> Result<Trace, serde_path_to_error::Error<serde_json::Error>> {
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer)
}

pub(crate) fn load_trace(path: &Path) -> Result<Trace> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_trace(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Replay a trace through a fresh session over its own memory image.
pub(crate) fn replay(trace: &Trace, oracle: &TaintOracle) -> Result<TraceOutcome> {
    if !matches!(trace.pointer_bits, 32 | 64) {
        bail!("unsupported pointer width {}", trace.pointer_bits);
    }
    let mut host = MemoryHost::new(trace.pointer_bits);
    for region in &trace.memory {
        match &region.contents {
            RegionContents::Utf8(text) => host.map_c_string(region.address, text),
            RegionContents::Bytes(bytes) => host.map(region.address, bytes.clone()),
            RegionContents::Words(words) => host.map_words(region.address, words),
        }
    }

    let mut bindings = BTreeMap::new();
    for input in &trace.inputs {
        let value = input_value(&mut host, &input.value);
        bindings.insert(input.name.clone(), value);
    }

    let mut session = Session::new(oracle);
    let mut aborted = None;
    for (call_index, call) in trace.calls.iter().enumerate() {
        let function = resolve_target(&call.target)
            .with_context(|| format!("call {call_index}"))?;
        let mut args = call
            .args
            .iter()
            .map(|arg| arg_value(arg, &bindings, trace.pointer_bits))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("call {call_index} ({})", function.name))?;
        let outcome = match session.invoke(&mut host, function, &mut args) {
            Ok(outcome) => outcome,
            Err(fault) => {
                error!("path aborted at call {call_index} ({}): {fault}", function.name);
                aborted = Some(Aborted { call_index, fault });
                break;
            }
        };
        for (spec, value) in call.args.iter().zip(args) {
            if let ArgSpec::Ref { name } = spec {
                bindings.insert(name.clone(), value);
            }
        }
        match (&call.bind, outcome.into_value()) {
            (Some(name), Some(value)) => {
                debug!("bind {name} = {:#x}", value.handle);
                bindings.insert(name.clone(), value);
            }
            (Some(name), None) => warn!(
                "call {call_index} ({}) returns void; {name} stays unbound",
                function.name
            ),
            (None, _) => {}
        }
    }

    Ok(TraceOutcome {
        report: session.finish(),
        aborted,
        bindings,
    })
}

fn resolve_target(target: &CallTarget) -> Result<&'static JniFunction> {
    let function = match target {
        CallTarget::Function(name) => jni_function_by_name(name),
        CallTarget::Symbol(symbol) => jni_function_by_symbol(symbol),
        CallTarget::Slot(slot) => jni_function(*slot),
    };
    function.with_context(|| format!("unknown JNI function {target:?}"))
}

fn arg_value(arg: &ArgSpec, bindings: &BTreeMap<String, Value>, pointer_bits: u32) -> Result<Value> {
    match arg {
        ArgSpec::Literal(handle) | ArgSpec::Address { address: handle } => {
            Ok(Value::unannotated(*handle, pointer_bits))
        }
        ArgSpec::Ref { name } => bindings
            .get(name)
            .cloned()
            .with_context(|| format!("unbound reference {name}")),
    }
}

fn input_value(host: &mut MemoryHost, input: &InputValue) -> Value {
    let pointer_bits = host.pointer_bits();
    match input {
        InputValue::Object {
            java_type,
            tainted,
            categories,
        } => {
            let mut identity = ObjectIdentity::new(Provenance::FromArgument, java_type.as_str());
            identity.taint = argument_taint(*tainted, categories);
            fresh(host, pointer_bits).with(Annotation::Object(identity))
        }
        InputValue::Class { class_name } => fresh(host, pointer_bits)
            .with(Annotation::Class(ClassIdentity::new(class_name.as_str()))),
        InputValue::String { value } => {
            let identity = ObjectIdentity::new(Provenance::FromArgument, "java/lang/String");
            fresh(host, pointer_bits)
                .with(Annotation::Object(identity))
                .with(Annotation::String(StringLiteral {
                    source: Provenance::FromArgument,
                    value: value.clone(),
                }))
        }
        InputValue::Primitive {
            java_type,
            tainted,
            categories,
        } => {
            let bits = primitive_type(java_type)
                .map(|ty| ty.width(pointer_bits))
                .unwrap_or(pointer_bits);
            fresh(host, bits).with(Annotation::Primitive(PrimitiveValue {
                source: Provenance::FromArgument,
                java_type: java_type.clone(),
                taint: argument_taint(*tainted, categories),
            }))
        }
    }
}

fn fresh(host: &mut MemoryHost, bits: u32) -> Value {
    Value::unannotated(host.fresh_handle(bits), bits)
}

fn argument_taint(tainted: bool, categories: &[String]) -> TaintInfo {
    if tainted {
        TaintInfo::tainted(TaintSourceKind::Argument, categories.iter().cloned())
    } else {
        TaintInfo::default()
    }
}

fn primitive_type(keyword: &str) -> Option<JniType> {
    [
        JniType::Boolean,
        JniType::Byte,
        JniType::Char,
        JniType::Short,
        JniType::Int,
        JniType::Long,
        JniType::Float,
        JniType::Double,
    ]
    .into_iter()
    .find(|ty| ty.primitive_name() == Some(keyword))
}
