use std::collections::BTreeMap;

use tracing::info;

use crate::annotation::{
    Annotation, INTENT_CLASS, IccInfo, SENSITIVE_INFO, TaintInfo, TaintSourceKind,
};

use super::{Finding, Invocation, InvocationObserver};

const CONTEXT_CLASS: &str = "android/content/Context";

/// Tracks explicit Intents from construction to `startActivity`.
#[derive(Default)]
pub(crate) struct IccDetector;

crate::register_observer!(IccDetector);

impl InvocationObserver for IccDetector {
    fn id(&self) -> &'static str {
        "icc"
    }

    fn observe(&self, invocation: &mut Invocation<'_>, findings: &mut Vec<Finding>) {
        if invocation.is(INTENT_CLASS, "setClassName") {
            set_class_name(invocation);
        } else if invocation.is(INTENT_CLASS, "putExtra") {
            put_extra(invocation);
        } else if invocation.is(INTENT_CLASS, "getStringExtra") {
            get_string_extra(invocation);
        } else if invocation.is(CONTEXT_CLASS, "startActivity") {
            start_activity(invocation, findings);
        }
    }
}

/// `intent.setClassName(context|package, className)`.
fn set_class_name(invocation: &mut Invocation<'_>) {
    let Some(activity_name) = invocation.string_argument(1).map(str::to_string) else {
        return;
    };
    let Some(intent) = invocation
        .receiver
        .as_deref_mut()
        .and_then(|receiver| receiver.object_identity_mut())
    else {
        return;
    };
    let icc = intent.icc.get_or_insert_with(IccInfo::default);
    icc.is_icc = true;
    icc.activity_name = Some(activity_name);
    let icc = icc.clone();
    if let Some(returned) = invocation
        .returned
        .as_deref_mut()
        .and_then(Annotation::as_object_mut)
    {
        returned.icc = Some(icc);
    }
}

/// `intent.putExtra(key, value)`; the call returns the receiver Intent.
fn put_extra(invocation: &mut Invocation<'_>) {
    let Some(key) = invocation.string_argument(0).map(str::to_string) else {
        return;
    };
    let extra = invocation
        .argument(1)
        .and_then(|value| value.payload())
        .cloned();
    let Some(intent) = invocation
        .receiver
        .as_deref_mut()
        .and_then(|receiver| receiver.object_identity_mut())
    else {
        return;
    };
    intent
        .icc
        .get_or_insert_with(IccInfo::default)
        .extras
        .insert(key, extra);
    let intent = intent.clone();
    if let Some(returned) = invocation.returned.as_deref_mut() {
        *returned = Annotation::Object(intent);
    }
}

/// `intent.getStringExtra(key)`: the extra is attacker-controlled input.
fn get_string_extra(invocation: &mut Invocation<'_>) {
    let key = invocation.string_argument(0).map(str::to_string);
    let Some(returned) = invocation
        .returned
        .as_deref_mut()
        .and_then(Annotation::as_object_mut)
    else {
        return;
    };
    returned
        .taint
        .absorb(&TaintInfo::tainted(TaintSourceKind::Api, [SENSITIVE_INFO]));
    let mut extras = BTreeMap::new();
    if let Some(key) = key {
        extras.insert(key, None);
    }
    returned.icc = Some(IccInfo {
        is_icc: true,
        activity_name: None,
        extras,
    });
}

/// `context.startActivity(intent)`.
fn start_activity(invocation: &Invocation<'_>, findings: &mut Vec<Finding>) {
    let Some(icc) = invocation
        .argument(0)
        .and_then(|intent| intent.object_identity())
        .and_then(|intent| intent.icc.as_ref())
    else {
        return;
    };
    let activity = icc.activity_name.as_deref().unwrap_or("<unknown>");
    info!(
        "ICC edge: {} -> {activity} ({} extras)",
        invocation.full_signature,
        icc.extras.len()
    );
    findings.push(Finding::IccEdge {
        caller: invocation.full_signature.to_string(),
        activity_name: icc.activity_name.clone(),
        extras: icc.extras.clone(),
    });
}

#[cfg(test)]
mod tests {
    use crate::annotation::{Annotation, SENSITIVE_INFO, TaintSourceKind};
    use crate::observers::Finding;
    use crate::test_harness::SessionHarness;

    const PUT_EXTRA: &str = "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;";

    #[test]
    fn explicit_intent_reports_edge_with_extras() {
        let mut harness = SessionHarness::new();
        let intent_class = harness.find_class("android/content/Intent");
        let context_class = harness.find_class("android/content/Context");
        let constructor = harness.method_id(&intent_class, "<init>", "()V");
        let intent = harness
            .call("NewObject", vec![intent_class.clone(), constructor])
            .expect("intent");
        let set_class_name = harness.method_id(
            &intent_class,
            "setClassName",
            "(Landroid/content/Context;Ljava/lang/String;)Landroid/content/Intent;",
        );
        let put_extra = harness.method_id(&intent_class, "putExtra", PUT_EXTRA);
        let start_activity =
            harness.method_id(&context_class, "startActivity", "(Landroid/content/Intent;)V");
        let context = harness.input_object("android/content/Context", false);

        let target = harness.new_string_utf("com.example.Target");
        let mut args = vec![intent, set_class_name, context.clone(), target];
        let renamed = harness
            .call_in_place("CallObjectMethod", &mut args)
            .expect("renamed");
        assert_eq!(
            renamed
                .object_identity()
                .and_then(|object| object.icc.as_ref())
                .and_then(|icc| icc.activity_name.as_deref()),
            Some("com.example.Target")
        );
        let intent = args.swap_remove(0);

        let key = harness.new_string_utf("k");
        let value = harness.new_string_utf("v");
        let mut args = vec![intent, put_extra, key, value.clone()];
        let returned = harness
            .call_in_place("CallObjectMethod", &mut args)
            .expect("returned intent");
        assert_eq!(
            returned.object_identity(),
            args[0].object_identity(),
            "putExtra returns the receiver identity"
        );
        let intent = args.swap_remove(0);

        assert!(
            harness
                .call("CallVoidMethod", vec![context, start_activity, intent])
                .is_none()
        );
        let edges: Vec<_> = harness
            .findings()
            .iter()
            .filter_map(|finding| match finding {
                Finding::IccEdge {
                    activity_name,
                    extras,
                    ..
                } => Some((activity_name.clone(), extras.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(edges.len(), 1);
        let (activity_name, extras) = &edges[0];
        assert_eq!(activity_name.as_deref(), Some("com.example.Target"));
        assert_eq!(extras.len(), 1);
        assert_eq!(
            extras.get("k"),
            Some(&value.payload().cloned()),
            "extra value is a copy of the argument annotation"
        );
    }

    #[test]
    fn extras_accumulate_across_put_extra_calls() {
        let mut harness = SessionHarness::new();
        let intent_class = harness.find_class("android/content/Intent");
        let intent = harness.call("AllocObject", vec![intent_class.clone()]).expect("intent");
        let put_extra = harness.method_id(&intent_class, "putExtra", PUT_EXTRA);
        let mut intent = intent;
        for key in ["a", "b"] {
            let key = harness.new_string_utf(key);
            let value = harness.new_string_utf("v");
            let mut args = vec![intent, put_extra.clone(), key, value];
            harness.call_in_place("CallObjectMethod", &mut args);
            intent = args.swap_remove(0);
        }
        let icc = intent
            .object_identity()
            .and_then(|object| object.icc.as_ref())
            .expect("icc");
        assert_eq!(icc.extras.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn string_extra_is_a_tainted_icc_marker() {
        let mut harness = SessionHarness::new();
        let intent_class = harness.find_class("android/content/Intent");
        let intent = harness.input_object("android/content/Intent", false);
        let get_extra = harness.method_id(
            &intent_class,
            "getStringExtra",
            "(Ljava/lang/String;)Ljava/lang/String;",
        );
        let key = harness.new_string_utf("token");
        let extra = harness
            .call("CallObjectMethod", vec![intent, get_extra, key])
            .expect("extra");
        let identity = extra.object_identity().expect("identity");
        assert!(identity.taint.is_tainted);
        assert_eq!(identity.taint.source_kind, Some(TaintSourceKind::Api));
        assert!(identity.taint.categories.contains(SENSITIVE_INFO));
        let icc = identity.icc.as_ref().expect("icc");
        assert!(icc.is_icc);
        assert_eq!(icc.extras.get("token"), Some(&None::<Annotation>));
    }

    #[test]
    fn start_activity_without_icc_state_reports_nothing() {
        let mut harness = SessionHarness::new();
        let context_class = harness.find_class("android/content/Context");
        let start_activity =
            harness.method_id(&context_class, "startActivity", "(Landroid/content/Intent;)V");
        let context = harness.input_object("android/content/Context", false);
        let not_an_intent = harness.input_object("java/lang/Object", false);
        harness.call("CallVoidMethod", vec![context, start_activity, not_an_intent]);
        assert!(harness.findings().is_empty());
    }
}
