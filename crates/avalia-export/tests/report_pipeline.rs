use uuid::Uuid;

use avalia_core::models::evaluation::{Evaluation, EvaluationStatus};
use avalia_core::models::merged::{InstanceSummary, MergedTaskRow};
use avalia_core::models::patient::Patient;
use avalia_core::models::response::ResponseStatus;
use avalia_export::docx::generate_docx;
use avalia_export::render::{DEFAULT_TEMPLATE, render_report};
use avalia_export::report::{InstanceView, build_report};
use avalia_export::styles::DocumentStyles;

fn merged_row(
    instance_id: Uuid,
    level: u32,
    item_number: &str,
    name: &str,
    status: ResponseStatus,
    response_value: &str,
) -> MergedTaskRow {
    MergedTaskRow {
        instance_id,
        protocol_item_id: Uuid::new_v4(),
        level,
        order: 1,
        item_number: item_number.to_string(),
        name: name.to_string(),
        skill: String::new(),
        milestone: String::new(),
        example: String::new(),
        criterion: String::new(),
        question: String::new(),
        objective: String::new(),
        response_value: response_value.to_string(),
        additional_info: String::new(),
        status,
        response_date: None,
    }
}

fn fixture() -> (Patient, Evaluation, Vec<InstanceView>) {
    let mut patient = Patient::new("Ana Souza");
    patient.birth_date = Some(jiff::civil::date(2019, 7, 2));

    let now = jiff::Timestamp::now();
    let evaluation = Evaluation {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        professional_id: "prof-1".to_string(),
        evaluation_date: jiff::civil::date(2026, 3, 10),
        status: EvaluationStatus::InProgress,
        created_at: now,
        updated_at: now,
    };

    let instance_id = Uuid::new_v4();
    let view = InstanceView {
        summary: InstanceSummary {
            instance_id,
            master_protocol_id: Uuid::new_v4(),
            protocol_name: "ABC-Scale".to_string(),
            linked_at: now,
        },
        tasks: vec![
            merged_row(instance_id, 1, "1.1", "Eye contact", ResponseStatus::Answered, "yes"),
            merged_row(instance_id, 1, "1.2", "Joint attention", ResponseStatus::Pending, ""),
            merged_row(instance_id, 2, "2.1", "Imitation", ResponseStatus::Pending, ""),
        ],
    };

    (patient, evaluation, vec![view])
}

#[test]
fn report_groups_tasks_by_level_in_order() {
    let (patient, evaluation, views) = fixture();
    let report = build_report(&patient, &evaluation, &views);

    assert_eq!(report.patient_name, "Ana Souza");
    assert_eq!(report.patient_birth_date, "02/07/2019");
    assert_eq!(report.evaluation_date, "10/03/2026");
    assert_eq!(report.status, "Em andamento");

    assert_eq!(report.protocols.len(), 1);
    let section = &report.protocols[0];
    assert_eq!(section.protocol_name, "ABC-Scale");
    assert_eq!(section.levels.len(), 2);
    assert_eq!(section.levels[0].level, 1);
    assert_eq!(section.levels[0].tasks.len(), 2);
    assert_eq!(section.levels[1].level, 2);
    assert_eq!(section.levels[1].tasks.len(), 1);
}

#[test]
fn default_template_renders_answers_and_pending_placeholder() {
    let (patient, evaluation, views) = fixture();
    let report = build_report(&patient, &evaluation, &views);

    let rendered = render_report(&report, DEFAULT_TEMPLATE).unwrap();
    assert!(rendered.contains("# Relatório de Avaliação - Ana Souza"));
    assert!(rendered.contains("ABC-Scale"));
    assert!(rendered.contains("Item 1.1: Eye contact"));
    assert!(rendered.contains("Resposta: yes"));
    assert!(rendered.contains("Não Respondido"));
    assert!(rendered.contains("Nível 2"));
}

#[test]
fn empty_report_renders_no_protocol_notice() {
    let (patient, evaluation, _) = fixture();
    let report = build_report(&patient, &evaluation, &[]);

    let rendered = render_report(&report, DEFAULT_TEMPLATE).unwrap();
    assert!(rendered.contains("Nenhum protocolo vinculado a esta avaliação."));
}

#[test]
fn rendered_report_converts_to_docx() {
    let (patient, evaluation, views) = fixture();
    let report = build_report(&patient, &evaluation, &views);
    let rendered = render_report(&report, DEFAULT_TEMPLATE).unwrap();

    let bytes = generate_docx(&rendered, &DocumentStyles::default()).unwrap();
    // DOCX is a zip container.
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn invalid_template_is_a_parse_error() {
    let (patient, evaluation, views) = fixture();
    let report = build_report(&patient, &evaluation, &views);

    let err = render_report(&report, "{% for x in %}").unwrap_err();
    assert!(matches!(err, avalia_export::ExportError::TemplateParse(_)));
}
