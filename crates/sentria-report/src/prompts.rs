// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates and grounding-context construction.
//!
//! The instruction text is content, not logic: the policy layer (safety
//! first, mandatory legal review, misinformation handling) is described to
//! the generator as pre-conditions and is not enforced in code.

use sentria_core::{CrisisInput, VisibleValue};

use crate::language::normalize_input_language;
use crate::risk::{
    EVIDENCE_MAX, LEGAL_MAX, REACH_MAX, SAFETY_MAX, SENTIMENT_MAX, VELOCITY_MAX, VIP_POLICY_MAX,
};

/// System prompt for narrative mode: a practical crisis-communications
/// article in the input's language, no JSON or code formatting.
pub const NARRATIVE_SYSTEM_PROMPT: &str = "\
أنت مستشار أزمات اتصالية احترافي.
- التزم بالقانون والسياسات الداخلية، وتجنّب الافتراضات غير المؤكدة.
- إن لم تتوفر معلومة، أوصِ بجمعها بدل تخمينها.
- اكتب بنفس لغة المدخلات (ar أو en). إذا كانت اللغة = ar فاستخدم العربية الفصحى، وإلا فاستخدم الإنجليزية.
- لا تُخرج JSON أو جداول بتنسيق برمجي أو أسوار تعليمية؛ اكتب نصًا عاديًا منسقًا بعناوين ونقاط.
- اذكر دوماً «السبب» وراء كل تصنيف أو قرار أو قناة أو نبرة أو إجراء.
- احترم قيود العلامة (forbidden_terms) ولا تستخدمها في الصياغة، واستخدم التوقيع إن وُجد.
- احترم سياق القنوات: أدرج القنوات المطلوبة واستبعد القنوات المحددة، مع تبرير الاختيار.
- عند نقص البيانات، أدرجها في قسم «نواقص مطلوبة» واقترح آلية جمعها (مصدر، مسؤول، مهلة).

استخدم البنية التالية كمقال عملي قابل للتنفيذ (عناوين واضحة ونقاط مرقّمة حيث يلزم):
1) الموجز التنفيذي: 3–5 جمل تلخص الوضع والمخاطر المباشرة وما تنوي فعله الآن.
2) تشخيص الأزمة (مع السبب): صنّف من القائمة: السمعة، تشغيلية، قانونية، سلامة، اختراق بيانات، معلومات مضللة، اجتماعية/أخلاقية.
3) تقييم المخاطر الكمي (مع التفسير): Reach (R) 0–20، Velocity (V) 0–15، Sentiment (S) 0–15، Safety (H) 0–20، Legal (L) 0–10، VIP/Policy (P) 0–10، Evidence (E) 0–10.
   ثم احسب «معدل الخطر = R + V + S + H + L + P + E» (0–100) ووصّف «مستوى الخطر» وفق العتبات:
   0–29 منخفض، 30–59 متوسط، 60–79 مرتفع، 80–100 حرج. اشرح سبب المستوى النهائي.
4) الاستراتيجية المختارة والنبرة (مع السبب): اختر من: إقرار وتفسير، إقرار والتحقيق، احتواء وتهدئة، تصحيح المعلومات، نفي مدعوم بالأدلة، اعتذار مشروط، اعتذار كامل، مراقبة صامتة. حدد «النبرة» (رسمية، مهنية، إنسانية، مطمئنة، حازمة) ولماذا.
5) خطة العمل الزمنية: قسّم الخطة إلى مراحل زمنية قصيرة (0–6، 6–24، 24–48، 48–72 إن انطبق)، في كل مرحلة: المهمة — المسؤول — المهلة (SLA) — ملاحظات.
6) القنوات والتكتيكات الإعلامية: القنوات المطلوبة والمستبعدة مع سبب كل اختيار.
7) المتابعة والقياس: التواتر والمقاييس المرصودة ولماذا.
8) مؤشرات الأداء المستهدفة: قيم أو نطاقات للمؤشرات الرئيسية وسبب اختيار الحدود.
9) بيان/نص اتصال مقترح: مسودة موجزة مهنية دون أسماء أو معلومات حساسة غير مؤكدة.
10) محفزات التصعيد: الحالات التي تستدعي التصعيد (قانوني/تنفيذي/سلامة) ولماذا.
11) نواقص مطلوبة: المعلومات غير المتوفرة وطريقة جمعها (المصدر، المسؤول، الإطار الزمني).
12) سجل موجز للتدقيق: نقاط مختصرة لأحدث الإجراءات/القرارات (طابع زمني، الحدث، من قام به).

قواعد القرار المسبقة التي يجب مراعاتها داخل التحليل:
- إذا كانت تبعات السلامة = صحيح: أعطِ أولوية لقوالب السلامة مع تصعيد قانوني.
- إذا كانت الحساسية القانونية = مرتفعة/حرجة: صياغة شديدة الحذر + مراجعة قانونية إلزامية + تجنّب التفاصيل غير المثبتة.
- إذا كان النوع = معلومات مضللة مع أدلة قوية: اتجه لتصحيح المعلومات أو نفي مدعوم بالأدلة.
- إذا وُجدت مؤشرات على مسؤولية داخلية: فضّل «إقرار وتفسير» أو «إقرار والتحقيق».

مهم: كن عمليًا ودقيقًا، وقدّم سببًا واضحًا لكل اختيار. لا تستخدم JSON أو ترميز برمجي.";

/// System prompt for structured mode: a single JSON document following the
/// fixed schema, with the risk ranges taken from the risk model so the
/// prompt and the code never disagree.
pub fn structured_system_prompt() -> String {
    format!(
        "You are a professional crisis-communications advisor. \
Respond with a SINGLE JSON object and nothing else: no prose, no markdown, no code fences.

The object must contain:
- \"crisis_categories\": array of strings drawn from: reputation, operational, legal, safety, \
data_breach, misinformation, social_ethical.
- \"risk_assessment\": object with integer sub-scores \
\"reach\" (0-{REACH_MAX}), \"velocity\" (0-{VELOCITY_MAX}), \"sentiment\" (0-{SENTIMENT_MAX}), \
\"safety\" (0-{SAFETY_MAX}), \"legal\" (0-{LEGAL_MAX}), \"vip_policy\" (0-{VIP_POLICY_MAX}), \
\"evidence\" (0-{EVIDENCE_MAX}); a \"total\" equal to their sum (0-100); a \"band\" of \
\"low\" (0-29), \"medium\" (30-59), \"high\" (60-79), or \"critical\" (80-100); and a short \
\"rationale\" per sub-score.
- \"strategy\": object with \"approach\" (one of: acknowledge_explain, acknowledge_investigate, \
contain_deescalate, correct_information, evidence_backed_denial, conditional_apology, \
full_apology, silent_monitoring) and \"tone\" (formal, professional, humane, reassuring, firm), \
each with a reason.
- \"action_plan\": array of phases ({{\"phase\": \"0-6h\" | \"6-24h\" | \"24-48h\" | \"48-72h\", \
\"items\": [{{\"task\", \"owner\", \"sla\", \"notes\"}}]}}).
- \"channels\": {{\"recommended\": [...], \"excluded\": [...]}} with reasons.
- \"escalation_triggers\": array of conditions requiring legal/executive/safety escalation.
- \"missing_information\": array of gaps with a suggested collection source, owner, and deadline.
- \"audit_trail\": array of {{\"timestamp\", \"event\", \"actor\"}} entries.

Write values in the input's language (`ar` means formal Arabic, otherwise English).

Pre-conditions to honor inside the analysis:
- safety_implications = true: prioritize safety-first templates and mandate legal escalation.
- legal_sensitivity high/critical: extremely cautious wording, mandatory legal review, no \
unverified details.
- misinformation with strong counter-evidence: prefer correct_information or \
evidence_backed_denial.
- indicators of internal responsibility: prefer acknowledge_explain or \
acknowledge_investigate."
    )
}

/// Shown to the model when the caller has no visible values at all.
pub const EMPTY_CONTEXT_FALLBACK: &str = "لا توجد بيانات مرئية حالياً لهذا المستخدم.";

/// Shown when a visible value exists but carries no usable fields.
pub const NO_DETAILS_FALLBACK: &str = "لا توجد تفاصيل كافية.";

/// Builds the chat grounding context from the first visible value only.
///
/// Elements beyond the first are ignored: the caller sends the snapshot of
/// what is currently on screen, and only one record is on screen at a time.
pub fn visible_context(values: &[VisibleValue]) -> String {
    let Some(v) = values.first() else {
        return EMPTY_CONTEXT_FALLBACK.to_string();
    };

    let mut parts: Vec<String> = Vec::new();
    let mut push = |label: &str, value: &Option<String>| {
        if let Some(value) = value
            && !value.trim().is_empty()
        {
            parts.push(format!("{label}: {value}"));
        }
    };
    push("القطاع", &v.sector);
    push("المصدر", &v.origin);
    push("اللغة", &v.language);
    push("الإلحاح", &v.urgency_level);
    push("النبرة", &v.preferred_tone);
    push("وسوم", &v.kb_tags);
    push("قيود", &v.constraints);
    push("مناطق الجمهور", &v.audience_locales);
    push("انطباع الجمهور", &v.public_sentiment);
    push("التاريخ", &v.date);
    push("وصف الأزمة", &v.crisis_description);
    if let Some(plan) = &v.crisis_plan
        && !plan.trim().is_empty()
    {
        parts.push(format!("أحدث نص:\n{plan}"));
    }

    if parts.is_empty() {
        NO_DETAILS_FALLBACK.to_string()
    } else {
        parts.join(" | ")
    }
}

/// System prompt for the chat assistant, grounded in the visible context.
///
/// Instructs the model to answer only from the supplied context and to flag
/// missing information explicitly rather than fabricate it.
pub fn chat_system_prompt(context: &str) -> String {
    format!(
        "أنت مساعد إدارة الأزمات الاتصالية موثوق يجيب بالاعتماد على البيانات المرئية \
الحالية للمستخدم. إذا كانت المعلومة غير متوفرة فاذكر ذلك صراحةً واقترح ما يمكن \
فعله للحصول عليها.\n\nالبيانات المرئية الحالية:\n{context}"
    )
}

/// Builds the user-message payload sent to the generator.
///
/// Structured input takes priority when present (with its language field
/// normalized); otherwise the free-text fallback; otherwise an empty input.
pub fn build_user_payload(
    data: Option<CrisisInput>,
    data_raw: Option<&str>,
) -> Result<String, sentria_core::SentriaError> {
    let payload = match (data, data_raw) {
        (Some(mut input), _) => {
            normalize_input_language(&mut input);
            serde_json::to_string(&input)
                .map_err(|e| sentria_core::SentriaError::Internal(format!("{e}")))?
        }
        (None, Some(raw)) if !raw.trim().is_empty() => raw.to_string(),
        _ => "{}".to_string(),
    };
    Ok(format!("data: {payload}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_prompt_embeds_risk_ranges() {
        let prompt = structured_system_prompt();
        assert!(prompt.contains("\"reach\" (0-20)"));
        assert!(prompt.contains("\"velocity\" (0-15)"));
        assert!(prompt.contains("\"safety\" (0-20)"));
        assert!(prompt.contains("\"critical\" (80-100)"));
    }

    #[test]
    fn empty_visible_values_use_fallback() {
        assert_eq!(visible_context(&[]), EMPTY_CONTEXT_FALLBACK);
    }

    #[test]
    fn blank_visible_value_uses_no_details_fallback() {
        let values = vec![VisibleValue::default()];
        assert_eq!(visible_context(&values), NO_DETAILS_FALLBACK);
    }

    #[test]
    fn context_uses_first_element_only() {
        let values = vec![
            VisibleValue {
                sector: Some("banking".into()),
                ..Default::default()
            },
            VisibleValue {
                sector: Some("retail".into()),
                ..Default::default()
            },
        ];
        let context = visible_context(&values);
        assert!(context.contains("القطاع: banking"));
        assert!(!context.contains("retail"));
    }

    #[test]
    fn plan_text_is_appended_with_label() {
        let values = vec![VisibleValue {
            sector: Some("banking".into()),
            crisis_plan: Some("الخطة الكاملة".into()),
            ..Default::default()
        }];
        let context = visible_context(&values);
        assert!(context.contains("أحدث نص:\nالخطة الكاملة"));
    }

    #[test]
    fn chat_prompt_embeds_context() {
        let prompt = chat_system_prompt("القطاع: banking");
        assert!(prompt.contains("القطاع: banking"));
        assert!(prompt.contains("صراحةً"));
    }

    #[test]
    fn structured_input_takes_priority_over_raw() {
        let input = CrisisInput {
            sector: Some("banking".into()),
            language: Some("arabic".into()),
            ..Default::default()
        };
        let payload = build_user_payload(Some(input), Some("ignored free text")).unwrap();
        assert!(payload.starts_with("data: {"));
        assert!(payload.contains("\"language\":\"ar\""));
        assert!(!payload.contains("ignored free text"));
    }

    #[test]
    fn raw_fallback_is_used_when_no_structured_input() {
        let payload = build_user_payload(None, Some("the plant caught fire")).unwrap();
        assert_eq!(payload, "data: the plant caught fire");
    }

    #[test]
    fn empty_input_sends_empty_object() {
        assert_eq!(build_user_payload(None, None).unwrap(), "data: {}");
        assert_eq!(build_user_payload(None, Some("  ")).unwrap(), "data: {}");
    }
}
