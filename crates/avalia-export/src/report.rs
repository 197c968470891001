//! Assembly of the [`EvaluationReport`] structure from the engine's read
//! models: one section per linked instance, tasks grouped by level in
//! snapshot order.

use avalia_core::models::evaluation::{Evaluation, EvaluationStatus};
use avalia_core::models::merged::{InstanceSummary, MergedTaskRow};
use avalia_core::models::patient::Patient;
use avalia_core::models::report::{EvaluationReport, LevelSection, ProtocolSection};

/// One linked instance with its merged task rows, as produced by the
/// response recorder's merge-at-read.
#[derive(Debug, Clone)]
pub struct InstanceView {
    pub summary: InstanceSummary,
    pub tasks: Vec<MergedTaskRow>,
}

/// Build the fully-merged report structure. `tasks` in each view are
/// expected in merge order (level, then item number); grouping preserves
/// that order.
pub fn build_report(
    patient: &Patient,
    evaluation: &Evaluation,
    instances: &[InstanceView],
) -> EvaluationReport {
    EvaluationReport {
        patient_name: patient.name.clone(),
        patient_birth_date: patient
            .birth_date
            .map(format_date)
            .unwrap_or_else(|| "N/A".to_string()),
        evaluation_date: format_date(evaluation.evaluation_date),
        status: status_label(evaluation.status).to_string(),
        protocols: instances.iter().map(protocol_section).collect(),
    }
}

fn protocol_section(view: &InstanceView) -> ProtocolSection {
    let mut levels: Vec<LevelSection> = Vec::new();
    for task in &view.tasks {
        match levels.last_mut() {
            Some(section) if section.level == task.level => section.tasks.push(task.clone()),
            _ => levels.push(LevelSection {
                level: task.level,
                tasks: vec![task.clone()],
            }),
        }
    }

    ProtocolSection {
        protocol_name: view.summary.protocol_name.clone(),
        linked_at: view
            .summary
            .linked_at
            .strftime("%d/%m/%Y")
            .to_string(),
        levels,
    }
}

fn format_date(date: jiff::civil::Date) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

fn status_label(status: EvaluationStatus) -> &'static str {
    match status {
        EvaluationStatus::InProgress => "Em andamento",
        EvaluationStatus::Finalized => "Finalizada",
    }
}
