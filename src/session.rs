use std::collections::BTreeMap;
use std::sync::OnceLock;

use opentelemetry::KeyValue;
use serde::Serialize;
use tracing::debug;

use crate::host::Host;
use crate::jni::natives::NativeRegistry;
use crate::jni::{Call, CallOutcome, JniFault, JniFunction, dispatch};
use crate::observers::Finding;
use crate::taint_catalog::TaintOracle;
use crate::value::Value;

/// Dispatch counters for one session, mergeable across sessions.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct DispatchCoverage {
    pub(crate) modeled: usize,
    pub(crate) fallback: usize,
    pub(crate) faults: usize,
    per_function: BTreeMap<&'static str, usize>,
    fallback_functions: BTreeMap<&'static str, usize>,
}

impl DispatchCoverage {
    fn record_modeled(&mut self, function: &'static str) {
        self.modeled += 1;
        *self.per_function.entry(function).or_insert(0) += 1;
    }

    fn record_fallback(&mut self, function: &'static str) {
        self.fallback += 1;
        *self.per_function.entry(function).or_insert(0) += 1;
        *self.fallback_functions.entry(function).or_insert(0) += 1;
    }

    fn record_fault(&mut self, function: &'static str) {
        self.faults += 1;
        *self.per_function.entry(function).or_insert(0) += 1;
    }

    /// Returns how often a function was dispatched.
    #[cfg(test)]
    pub(crate) fn call_count(&self, function: &str) -> usize {
        self.per_function.get(function).copied().unwrap_or(0)
    }

    /// Returns how often a function produced an unconstrained result.
    #[cfg(test)]
    pub(crate) fn fallback_count(&self, function: &str) -> usize {
        self.fallback_functions.get(function).copied().unwrap_or(0)
    }

    pub(crate) fn total(&self) -> usize {
        self.modeled + self.fallback + self.faults
    }

    /// Merges another coverage snapshot into this one.
    pub(crate) fn merge_from(&mut self, other: &DispatchCoverage) {
        self.modeled += other.modeled;
        self.fallback += other.fallback;
        self.faults += other.faults;
        for (function, count) in &other.per_function {
            *self.per_function.entry(function).or_insert(0) += count;
        }
        for (function, count) in &other.fallback_functions {
            *self.fallback_functions.entry(function).or_insert(0) += count;
        }
    }
}

/// A finding tagged with the call that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Report {
    pub(crate) call_index: usize,
    pub(crate) function: &'static str,
    pub(crate) finding: Finding,
}

/// Everything a finished session hands back.
#[derive(Clone, Debug, Default)]
pub(crate) struct SessionReport {
    pub(crate) reports: Vec<Report>,
    pub(crate) coverage: DispatchCoverage,
    pub(crate) natives: NativeRegistry,
}

/// State of one analysis path, from trace start to `finish`.
pub(crate) struct Session<'o> {
    oracle: &'o TaintOracle,
    natives: NativeRegistry,
    reports: Vec<Report>,
    coverage: DispatchCoverage,
    call_index: usize,
}

impl<'o> Session<'o> {
    pub(crate) fn new(oracle: &'o TaintOracle) -> Self {
        Self {
            oracle,
            natives: NativeRegistry::default(),
            reports: Vec::new(),
            coverage: DispatchCoverage::default(),
            call_index: 0,
        }
    }

    /// Dispatch one observed JNI call.
    pub(crate) fn invoke(
        &mut self,
        host: &mut dyn Host,
        function: &'static JniFunction,
        args: &mut [Value],
    ) -> Result<CallOutcome, JniFault> {
        let call_index = self.call_index;
        self.call_index += 1;
        let mut findings = Vec::new();
        let mut call = Call::new(host, args, self.oracle, &mut self.natives, &mut findings);
        let outcome = match dispatch(function, &mut call) {
            Ok(outcome) => outcome,
            Err(fault) => {
                self.coverage.record_fault(function.name);
                return Err(fault);
            }
        };
        let fell_back = call.fell_back();
        if fell_back {
            self.coverage.record_fallback(function.name);
        } else {
            self.coverage.record_modeled(function.name);
        }
        if dispatch_debug_enabled() {
            debug!(
                "#{call_index} {} slot={} fallback={fell_back} annotations={}",
                function.name,
                function.slot,
                outcome
                    .value()
                    .map(|value| value.annotations().len())
                    .unwrap_or(0)
            );
        }
        self.reports
            .extend(findings.into_iter().map(|finding| Report {
                call_index,
                function: function.name,
                finding,
            }));
        Ok(outcome)
    }

    #[cfg(test)]
    pub(crate) fn coverage(&self) -> &DispatchCoverage {
        &self.coverage
    }

    #[cfg(test)]
    pub(crate) fn natives(&self) -> &NativeRegistry {
        &self.natives
    }

    #[cfg(test)]
    pub(crate) fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub(crate) fn finish(self) -> SessionReport {
        SessionReport {
            reports: self.reports,
            coverage: self.coverage,
            natives: self.natives,
        }
    }
}

/// Returns whether per-call dispatch debug logging is enabled.
pub(crate) fn dispatch_debug_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("JNITAINT_DEBUG_DISPATCH")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// Emits one summary event for a trace's dispatch counters.
pub(crate) fn emit_dispatch_summary_event(trace: &str, report: &SessionReport) {
    let coverage = &report.coverage;
    let attributes = [
        KeyValue::new("jnitaint.trace", trace.to_string()),
        KeyValue::new("jnitaint.debug_summary", "dispatch"),
        KeyValue::new("jnitaint.modeled_count", coverage.modeled as i64),
        KeyValue::new("jnitaint.fallback_count", coverage.fallback as i64),
        KeyValue::new("jnitaint.fault_count", coverage.faults as i64),
        KeyValue::new("jnitaint.finding_count", report.reports.len() as i64),
        KeyValue::new("jnitaint.native_count", report.natives.len() as i64),
    ];
    crate::telemetry::add_current_span_event("jnitaint.debug.summary", &attributes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::jni::{jni_function, jni_function_by_name};

    #[test]
    fn reserved_slot_is_fatal() {
        let oracle = TaintOracle::empty();
        let mut session = Session::new(&oracle);
        let mut host = MemoryHost::new(64);
        let reserved = jni_function(2).expect("slot");
        let fault = session
            .invoke(&mut host, reserved, &mut [])
            .expect_err("reserved slot");
        assert_eq!(fault, JniFault::ReservedSlot { slot: 2 });
        assert_eq!(session.coverage().faults, 1);
    }

    #[test]
    fn unmodeled_calls_yield_fresh_values() {
        let oracle = TaintOracle::empty();
        let mut session = Session::new(&oracle);
        let mut host = MemoryHost::new(64);
        let function = jni_function_by_name("ExceptionOccurred").expect("function");
        let first = session
            .invoke(&mut host, function, &mut [Value::unannotated(1, 64)])
            .expect("first")
            .into_value()
            .expect("value");
        let second = session
            .invoke(&mut host, function, &mut [Value::unannotated(2, 64)])
            .expect("second")
            .into_value()
            .expect("value");
        assert!(first.is_unannotated());
        assert!(second.is_unannotated());
        assert_ne!(first.handle, second.handle);
        assert_eq!(session.coverage().fallback_count("ExceptionOccurred"), 2);
    }

    #[test]
    fn sessions_do_not_share_registrations() {
        let oracle = TaintOracle::empty();
        let mut host = MemoryHost::new(64);
        host.map_c_string(0x100, "run");
        host.map_c_string(0x200, "()V");
        host.map_words(0x300, &[0x100, 0x200, 0xbeef]);
        let register = jni_function_by_name("RegisterNatives").expect("function");

        let mut first = Session::new(&oracle);
        let mut args = [
            Value::unannotated(1, 64),
            Value::unannotated(0x300, 64),
            Value::unannotated(1, 64),
        ];
        first.invoke(&mut host, register, &mut args).expect("register");
        let second = Session::new(&oracle);
        assert_eq!(first.natives().len(), 1);
        assert!(second.natives().is_empty());
    }

    #[test]
    fn coverage_merges_counts() {
        let mut total = DispatchCoverage::default();
        let mut part = DispatchCoverage::default();
        part.record_modeled("FindClass");
        part.record_fallback("GetVersion");
        total.merge_from(&part);
        total.merge_from(&part);
        assert_eq!(total.modeled, 2);
        assert_eq!(total.fallback, 2);
        assert_eq!(total.call_count("FindClass"), 2);
        assert_eq!(total.fallback_count("GetVersion"), 2);
        assert_eq!(total.total(), 4);
    }
}
