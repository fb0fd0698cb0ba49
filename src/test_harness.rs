use std::io::Cursor;

use crate::annotation::{Annotation, ObjectIdentity, Provenance, SENSITIVE_INFO, TaintInfo, TaintSourceKind};
use crate::host::{Host, MemoryHost};
use crate::jni::natives::NativeRegistry;
use crate::jni::{JniFault, jni_function_by_name};
use crate::observers::Finding;
use crate::session::{DispatchCoverage, Session, SessionReport};
use crate::taint_catalog::TaintOracle;
use crate::value::Value;

const FIRST_BUFFER: u64 = 0x1000_0000;

/// Test harness that scripts one session over an in-memory host.
pub(crate) struct SessionHarness {
    host: MemoryHost,
    session: Session<'static>,
    next_buffer: u64,
}

impl SessionHarness {
    pub(crate) fn new() -> Self {
        Self::with_oracle(TaintOracle::empty())
    }

    /// Harness whose oracle is parsed from catalog text.
    pub(crate) fn with_catalog(catalog: &str) -> Self {
        let oracle = TaintOracle::from_reader(Cursor::new(catalog.as_bytes().to_vec()))
            .expect("parse catalog");
        Self::with_oracle(oracle)
    }

    /// Harness over a host with `pointer_bits`-wide pointers.
    pub(crate) fn with_pointer_bits(pointer_bits: u32) -> Self {
        let mut harness = Self::new();
        harness.host = MemoryHost::new(pointer_bits);
        harness
    }

    fn with_oracle(oracle: TaintOracle) -> Self {
        let oracle: &'static TaintOracle = Box::leak(Box::new(oracle));
        Self {
            host: MemoryHost::new(64),
            session: Session::new(oracle),
            next_buffer: FIRST_BUFFER,
        }
    }

    fn allocate(&mut self, len: usize) -> u64 {
        let address = self.next_buffer;
        self.next_buffer += (len as u64 + 16) & !0xf;
        address
    }

    /// Unannotated pointer-width value.
    pub(crate) fn raw(&self, handle: u64) -> Value {
        Value::unannotated(handle, self.host.pointer_bits())
    }

    /// Pointer to a NUL-terminated copy of `text`.
    pub(crate) fn c_string(&mut self, text: &str) -> Value {
        let address = self.allocate(text.len() + 1);
        self.host.map_c_string(address, text);
        self.raw(address)
    }

    /// Pointer to a copy of `bytes`.
    pub(crate) fn bytes(&mut self, bytes: Vec<u8>) -> Value {
        let address = self.allocate(bytes.len());
        self.host.map(address, bytes);
        self.raw(address)
    }

    /// Pointer to an array of `JNINativeMethod` records.
    pub(crate) fn native_methods(&mut self, methods: &[(&str, &str, u64)]) -> Value {
        let mut words = Vec::new();
        for (name, signature, fn_ptr) in methods {
            let name = self.c_string(name).handle;
            let signature = self.c_string(signature).handle;
            words.extend([name, signature, *fn_ptr]);
        }
        let address = self.allocate(words.len() * self.host.pointer_bytes());
        self.host.map_words(address, &words);
        self.raw(address)
    }

    /// Object handed to the native code by its Java caller.
    pub(crate) fn input_object(&mut self, java_type: &str, tainted: bool) -> Value {
        let mut identity = ObjectIdentity::new(Provenance::FromArgument, java_type);
        if tainted {
            identity.taint = TaintInfo::tainted(TaintSourceKind::Argument, [SENSITIVE_INFO]);
        }
        let bits = self.host.pointer_bits();
        let handle = self.host.fresh_handle(bits);
        Value::unannotated(handle, bits).with(Annotation::Object(identity))
    }

    pub(crate) fn try_call(
        &mut self,
        name: &str,
        args: &mut [Value],
    ) -> Result<Option<Value>, JniFault> {
        let function = jni_function_by_name(name).unwrap_or_else(|| panic!("unknown function {name}"));
        self.session
            .invoke(&mut self.host, function, args)
            .map(|outcome| outcome.into_value())
    }

    /// Call and keep argument mutations visible to the caller.
    pub(crate) fn call_in_place(&mut self, name: &str, args: &mut [Value]) -> Option<Value> {
        self.try_call(name, args).expect("JNI call")
    }

    pub(crate) fn call(&mut self, name: &str, mut args: Vec<Value>) -> Option<Value> {
        self.call_in_place(name, &mut args)
    }

    pub(crate) fn find_class(&mut self, name: &str) -> Value {
        let name = self.c_string(name);
        self.call("FindClass", vec![name]).expect("class")
    }

    fn member_id(&mut self, function: &str, class: &Value, name: &str, signature: &str) -> Value {
        let name = self.c_string(name);
        let signature = self.c_string(signature);
        self.call(function, vec![class.clone(), name, signature])
            .expect("member id")
    }

    pub(crate) fn method_id(&mut self, class: &Value, name: &str, signature: &str) -> Value {
        self.member_id("GetMethodID", class, name, signature)
    }

    pub(crate) fn static_method_id(&mut self, class: &Value, name: &str, signature: &str) -> Value {
        self.member_id("GetStaticMethodID", class, name, signature)
    }

    pub(crate) fn field_id(&mut self, class: &Value, name: &str, signature: &str) -> Value {
        self.member_id("GetFieldID", class, name, signature)
    }

    pub(crate) fn static_field_id(&mut self, class: &Value, name: &str, signature: &str) -> Value {
        self.member_id("GetStaticFieldID", class, name, signature)
    }

    pub(crate) fn new_string_utf(&mut self, text: &str) -> Value {
        let bytes = self.c_string(text);
        self.call("NewStringUTF", vec![bytes]).expect("string")
    }

    pub(crate) fn coverage(&self) -> &DispatchCoverage {
        self.session.coverage()
    }

    pub(crate) fn natives(&self) -> &NativeRegistry {
        self.session.natives()
    }

    pub(crate) fn findings(&self) -> Vec<&Finding> {
        self.session
            .reports()
            .iter()
            .map(|report| &report.finding)
            .collect()
    }

    pub(crate) fn finish(self) -> SessionReport {
        self.session.finish()
    }
}
