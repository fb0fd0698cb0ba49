use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use serde_sarif::sarif::{
    Artifact, ArtifactLocation, Invocation, Location, LogicalLocation, Message,
    MultiformatMessageString, PhysicalLocation, PropertyBag, ReportingDescriptor,
    Result as SarifResult, Run, SCHEMA_URL, Sarif, Tool, ToolComponent,
};

use crate::observers::{ICC_EDGE_RULE, NATIVE_REBIND_RULE, TAINTED_SINK_RULE};
use crate::session::{DispatchCoverage, Report};
use crate::trace::TraceOutcome;

const TOOL_NAME: &str = "jnitaint";

/// Metadata describing one reported finding kind.
#[derive(Clone, Debug)]
pub(crate) struct RuleMetadata {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
}

pub(crate) const RULES: [RuleMetadata; 3] = [
    RuleMetadata {
        id: ICC_EDGE_RULE,
        name: "ICC edge",
        description: "Native code starts an activity through an explicit Intent",
    },
    RuleMetadata {
        id: NATIVE_REBIND_RULE,
        name: "Native method rebinding",
        description: "RegisterNatives replaced an existing binding with a different function",
    },
    RuleMetadata {
        id: TAINTED_SINK_RULE,
        name: "Tainted sink argument",
        description: "A tainted value reaches a catalog sink through a JNI call",
    },
];

fn rule_descriptor(metadata: &RuleMetadata) -> ReportingDescriptor {
    ReportingDescriptor::builder()
        .id(metadata.id)
        .name(metadata.name)
        .short_description(
            MultiformatMessageString::builder()
                .text(metadata.description)
                .build(),
        )
        .build()
}

pub(crate) fn result_message(text: impl Into<String>) -> Message {
    Message::builder().text(text.into()).build()
}

/// One replayed trace file and what it produced.
pub(crate) struct ReplayedTrace {
    pub(crate) uri: String,
    pub(crate) length: u64,
    pub(crate) outcome: TraceOutcome,
}

fn report_result(uri: &str, artifact_index: usize, report: &Report) -> SarifResult {
    let finding = &report.finding;
    let logical = LogicalLocation::builder()
        .name(finding.location())
        .kind("function")
        .build();
    let physical = PhysicalLocation::builder()
        .artifact_location(
            ArtifactLocation::builder()
                .uri(uri.to_string())
                .index(artifact_index as i64)
                .build(),
        )
        .build();
    let location = Location::builder()
        .logical_locations(vec![logical])
        .physical_location(physical)
        .build();
    let mut properties = BTreeMap::new();
    properties.insert("jnitaint.call_index".to_string(), json!(report.call_index));
    properties.insert("jnitaint.function".to_string(), json!(report.function));
    properties.insert(
        "jnitaint.finding".to_string(),
        serde_json::to_value(finding).unwrap_or_default(),
    );
    let mut result = SarifResult::builder()
        .message(result_message(finding.message()))
        .locations(vec![location])
        .build();
    result.rule_id = Some(finding.rule_id().to_string());
    result.properties = Some(PropertyBag::builder().additional_properties(properties).build());
    result
}

/// SARIF results of every trace, sorted by rule id then message.
pub(crate) fn sarif_results(traces: &[ReplayedTrace]) -> Vec<SarifResult> {
    let mut results: Vec<SarifResult> = traces
        .iter()
        .enumerate()
        .flat_map(|(index, trace)| {
            trace
                .outcome
                .report
                .reports
                .iter()
                .map(move |report| report_result(&trace.uri, index, report))
        })
        .collect();
    results.sort_by(|left, right| {
        let left_id = left.rule_id.as_deref().unwrap_or("");
        let right_id = right.rule_id.as_deref().unwrap_or("");
        let left_msg = left.message.text.as_deref().unwrap_or("");
        let right_msg = right.message.text.as_deref().unwrap_or("");
        left_id.cmp(right_id).then(left_msg.cmp(right_msg))
    });
    results
}

pub(crate) fn artifacts(traces: &[ReplayedTrace]) -> Vec<Artifact> {
    traces
        .iter()
        .map(|trace| {
            Artifact::builder()
                .location(ArtifactLocation::builder().uri(trace.uri.clone()).build())
                .length(trace.length as i64)
                .build()
        })
        .collect()
}

/// One `RegisterNatives` binding still live when its trace ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RegisteredNative {
    pub(crate) trace: String,
    pub(crate) name: String,
    pub(crate) signature: String,
    pub(crate) class_name: Option<String>,
    pub(crate) fn_ptr: u64,
}

/// Trace that stopped at a fatal call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct AbortedPath {
    pub(crate) trace: String,
    pub(crate) call_index: usize,
    pub(crate) fault: String,
}

/// Metadata captured for SARIF invocation properties.
#[derive(Clone, Debug, Default)]
pub(crate) struct InvocationStats {
    pub(crate) replay_duration_ms: u128,
    pub(crate) trace_count: usize,
    pub(crate) aborted: Vec<AbortedPath>,
    pub(crate) natives: Vec<RegisteredNative>,
    pub(crate) catalog_entries: usize,
    pub(crate) coverage: DispatchCoverage,
    pub(crate) trace_id: Option<String>,
}

impl InvocationStats {
    pub(crate) fn from_traces(traces: &[ReplayedTrace], catalog_entries: usize) -> Self {
        let mut stats = Self {
            trace_count: traces.len(),
            catalog_entries,
            ..Self::default()
        };
        for trace in traces {
            stats.coverage.merge_from(&trace.outcome.report.coverage);
            stats.natives.extend(trace.outcome.report.natives.iter().map(
                |(name, signature, binding)| RegisteredNative {
                    trace: trace.uri.clone(),
                    name: name.to_string(),
                    signature: signature.to_string(),
                    class_name: binding.class_name.clone(),
                    fn_ptr: binding.fn_ptr,
                },
            ));
            if let Some(aborted) = &trace.outcome.aborted {
                stats.aborted.push(AbortedPath {
                    trace: trace.uri.clone(),
                    call_index: aborted.call_index,
                    fault: aborted.fault.to_string(),
                });
            }
        }
        stats
    }
}

pub(crate) fn build_invocation(stats: &InvocationStats) -> Invocation {
    let arguments: Vec<String> = std::env::args().collect();
    let command_line = arguments.join(" ");
    let mut properties = BTreeMap::new();
    properties.insert("jnitaint.replay_ms".to_string(), json!(stats.replay_duration_ms));
    properties.insert("jnitaint.trace_count".to_string(), json!(stats.trace_count));
    properties.insert(
        "jnitaint.aborted_path_count".to_string(),
        json!(stats.aborted.len()),
    );
    if !stats.aborted.is_empty() {
        properties.insert("jnitaint.aborted_paths".to_string(), json!(stats.aborted));
    }
    properties.insert("jnitaint.native_count".to_string(), json!(stats.natives.len()));
    if !stats.natives.is_empty() {
        properties.insert("jnitaint.natives".to_string(), json!(stats.natives));
    }
    properties.insert(
        "jnitaint.catalog_entries".to_string(),
        json!(stats.catalog_entries),
    );
    properties.insert("jnitaint.coverage".to_string(), json!(stats.coverage));
    if let Some(trace_id) = &stats.trace_id {
        properties.insert("jnitaint.trace_id".to_string(), json!(trace_id));
    }

    Invocation::builder()
        .execution_successful(true)
        .arguments(arguments)
        .command_line(command_line)
        .properties(PropertyBag::builder().additional_properties(properties).build())
        .build()
}

pub(crate) fn build_sarif(
    artifacts: Vec<Artifact>,
    invocation: Invocation,
    results: Vec<SarifResult>,
) -> Sarif {
    let rules = RULES.iter().map(rule_descriptor).collect::<Vec<_>>();
    let driver = ToolComponent::builder()
        .name(TOOL_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .rules(rules)
        .build();
    let tool = Tool {
        driver,
        extensions: None,
        properties: None,
    };
    let run = if artifacts.is_empty() {
        Run::builder()
            .tool(tool)
            .invocations(vec![invocation])
            .results(results)
            .build()
    } else {
        Run::builder()
            .tool(tool)
            .invocations(vec![invocation])
            .results(results)
            .artifacts(artifacts)
            .build()
    };

    Sarif::builder()
        .schema(SCHEMA_URL)
        .runs(vec![run])
        .version(json!("2.1.0"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jni::natives::NativeBinding;
    use crate::observers::Finding;
    use crate::session::SessionReport;

    fn replayed(uri: &str, findings: Vec<Finding>) -> ReplayedTrace {
        let reports = findings
            .into_iter()
            .enumerate()
            .map(|(call_index, finding)| Report {
                call_index,
                function: "CallVoidMethod",
                finding,
            })
            .collect();
        ReplayedTrace {
            uri: uri.to_string(),
            length: 10,
            outcome: TraceOutcome {
                report: SessionReport {
                    reports,
                    ..SessionReport::default()
                },
                aborted: None,
                bindings: BTreeMap::new(),
            },
        }
    }

    fn sink(method: &str) -> Finding {
        Finding::TaintedSink {
            method: method.to_string(),
            position: 1,
            categories: vec!["IMEI".to_string()],
        }
    }

    #[test]
    fn sarif_is_minimal_and_valid_shape() {
        let invocation = build_invocation(&InvocationStats::default());
        let sarif = build_sarif(Vec::new(), invocation, Vec::new());
        let value = serde_json::to_value(&sarif).expect("serialize SARIF");

        assert_eq!(value["version"], "2.1.0");
        assert_eq!(value["$schema"], SCHEMA_URL);
        assert_eq!(value["runs"][0]["tool"]["driver"]["name"], TOOL_NAME);
        let rules = value["runs"][0]["tool"]["driver"]["rules"]
            .as_array()
            .expect("rules array");
        assert_eq!(rules.len(), RULES.len());
        assert!(
            value["runs"][0]["results"]
                .as_array()
                .expect("results array")
                .is_empty()
        );
        assert_eq!(
            value["runs"][0]["invocations"][0]["executionSuccessful"],
            true
        );
    }

    #[test]
    fn results_are_sorted_by_rule_then_message() {
        let traces = vec![
            replayed("b.json", vec![sink("Lb;.z:()V"), sink("Lb;.a:()V")]),
            replayed(
                "a.json",
                vec![Finding::IccEdge {
                    caller: "Landroid/content/Context;.startActivity:(Landroid/content/Intent;)V"
                        .to_string(),
                    activity_name: Some("com.example.Target".to_string()),
                    extras: BTreeMap::new(),
                }],
            ),
        ];
        let results = sarif_results(&traces);
        let keys: Vec<_> = results
            .iter()
            .map(|result| {
                (
                    result.rule_id.clone().unwrap_or_default(),
                    result.message.text.clone().unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(keys[0].0, ICC_EDGE_RULE);
        assert_eq!(keys[1].0, TAINTED_SINK_RULE);
        assert!(keys[1].1.ends_with("Lb;.a:()V"));
        assert!(keys[2].1.ends_with("Lb;.z:()V"));
    }

    #[test]
    fn invocation_properties_carry_aborted_paths() {
        let mut aborted = replayed("a.json", Vec::new());
        aborted.outcome.aborted = Some(crate::trace::Aborted {
            call_index: 0,
            fault: crate::jni::JniFault::ReservedSlot { slot: 1 },
        });
        let traces = vec![aborted, replayed("b.json", Vec::new())];
        let stats = InvocationStats::from_traces(&traces, 4);
        let invocation = build_invocation(&stats);
        let value = serde_json::to_value(&invocation).expect("serialize invocation");
        assert_eq!(value["properties"]["jnitaint.aborted_path_count"], 1);
        assert_eq!(value["properties"]["jnitaint.trace_count"], 2);
        let path = &value["properties"]["jnitaint.aborted_paths"][0];
        assert_eq!(path["trace"], "a.json");
        assert_eq!(path["call_index"], 0);
        assert_eq!(path["fault"], "reserved JNI slot 1 was invoked");
        assert_eq!(value["properties"]["jnitaint.catalog_entries"], 4);
        assert!(value["properties"].get("jnitaint.natives").is_none());
    }

    #[test]
    fn invocation_properties_list_registered_natives() {
        let mut trace = replayed("lib.json", Vec::new());
        trace.outcome.report.natives.register(
            "sum",
            "(II)I",
            NativeBinding {
                class_name: Some("com/example/Math".to_string()),
                fn_ptr: 0x4000,
            },
        );
        let stats = InvocationStats::from_traces(&[trace], 0);
        let value =
            serde_json::to_value(build_invocation(&stats)).expect("serialize invocation");
        assert_eq!(value["properties"]["jnitaint.native_count"], 1);
        let native = &value["properties"]["jnitaint.natives"][0];
        assert_eq!(native["trace"], "lib.json");
        assert_eq!(native["name"], "sum");
        assert_eq!(native["class_name"], "com/example/Math");
        assert_eq!(native["fn_ptr"], 0x4000);
    }
}
