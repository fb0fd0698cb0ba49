use std::fs;
use std::process::Command;

use serde_json::Value;

fn jnitaint() -> String {
    std::env::var("CARGO_BIN_EXE_jnitaint").unwrap_or_else(|_| {
        let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        path.push("jnitaint");
        if cfg!(windows) {
            path.set_extension("exe");
        }
        path.to_string_lossy().to_string()
    })
}

const CATALOG: &str = "\
Landroid/telephony/TelephonyManager;.getDeviceId:()Ljava/lang/String; IMEI -> _SOURCE_
Landroid/util/Log;.i:(Ljava/lang/String;Ljava/lang/String;)I -> _SINK_
";

const LEAK_TRACE: &str = r#"{
  "memory": [
    {"address": 4096, "utf8": "android/telephony/TelephonyManager"},
    {"address": 4160, "utf8": "getDeviceId"},
    {"address": 4224, "utf8": "()Ljava/lang/String;"},
    {"address": 4288, "utf8": "android/util/Log"},
    {"address": 4352, "utf8": "i"},
    {"address": 4416, "utf8": "(Ljava/lang/String;Ljava/lang/String;)I"},
    {"address": 4480, "utf8": "tag"}
  ],
  "inputs": [
    {"name": "manager", "kind": "object", "java_type": "android/telephony/TelephonyManager"}
  ],
  "calls": [
    {"function": "FindClass", "args": [4096], "bind": "manager_class"},
    {"function": "GetMethodID", "args": [{"ref": "manager_class"}, 4160, 4224], "bind": "get_device_id"},
    {"function": "CallObjectMethod", "args": [{"ref": "manager"}, {"ref": "get_device_id"}], "bind": "imei"},
    {"function": "FindClass", "args": [4288], "bind": "log"},
    {"function": "GetStaticMethodID", "args": [{"ref": "log"}, 4352, 4416], "bind": "log_i"},
    {"function": "NewStringUTF", "args": [4480], "bind": "tag"},
    {"function": "CallStaticIntMethod", "args": [{"ref": "log"}, {"ref": "log_i"}, {"ref": "tag"}, {"ref": "imei"}]}
  ]
}"#;

#[test]
fn replay_writes_sarif_with_tainted_sink() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog = dir.path().join("catalog.txt");
    let trace = dir.path().join("leak.json");
    let output = dir.path().join("out.sarif");
    fs::write(&catalog, CATALOG).expect("write catalog");
    fs::write(&trace, LEAK_TRACE).expect("write trace");

    let status = Command::new(jnitaint())
        .arg("--trace")
        .arg(&trace)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run jnitaint");
    assert!(status.success());

    let sarif: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read SARIF")).expect("SARIF");
    let run = &sarif["runs"][0];
    let results = run["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["ruleId"], "JNI_TAINTED_SINK");
    assert_eq!(results[0]["properties"]["jnitaint.finding"]["position"], 1);
    assert_eq!(
        results[0]["properties"]["jnitaint.finding"]["categories"][0],
        "IMEI"
    );
    assert_eq!(run["artifacts"].as_array().expect("artifacts").len(), 1);
    assert_eq!(
        run["invocations"][0]["properties"]["jnitaint.aborted_path_count"],
        0
    );
}

#[test]
fn reserved_slot_aborts_only_its_own_trace() {
    let dir = tempfile::tempdir().expect("temp dir");
    let aborted = dir.path().join("aborted.json");
    let clean = dir.path().join("clean.json");
    fs::write(&aborted, r#"{"calls": [{"slot": 0}]}"#).expect("write trace");
    fs::write(&clean, r#"{"calls": [{"function": "GetVersion"}]}"#).expect("write trace");

    let output = Command::new(jnitaint())
        .arg("--trace")
        .arg(&aborted)
        .arg("--trace")
        .arg(&clean)
        .arg("--output")
        .arg("-")
        .output()
        .expect("run jnitaint");
    assert!(output.status.success());

    let sarif: Value = serde_json::from_slice(&output.stdout).expect("SARIF");
    let properties = &sarif["runs"][0]["invocations"][0]["properties"];
    assert_eq!(properties["jnitaint.aborted_path_count"], 1);
    assert_eq!(properties["jnitaint.trace_count"], 2);
}
