use super::model::{ESPECIALIDADE, GuiaDataset, NOME_PACIENTE, NOME_PROFISSIONAL};

// ---------------------------------------------------------------------------
// Month filter
// ---------------------------------------------------------------------------

/// Indices of guias whose `MES` equals the selected month.
pub fn month_indices(dataset: &GuiaDataset, month: &str) -> Vec<usize> {
    dataset
        .guias
        .iter()
        .enumerate()
        .filter(|(_, g)| g.month() == month)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregate metrics for the selected month
// ---------------------------------------------------------------------------

/// The three headline numbers shown above the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthSummary {
    /// Number of guias in the month.
    pub guias: usize,
    /// Sum of authorized sessions (missing counts as zero).
    pub sessions: f64,
    /// Sum of `VALOR_TOTAL_SESSOES`.
    pub revenue: f64,
}

pub fn month_summary(dataset: &GuiaDataset, indices: &[usize]) -> MonthSummary {
    let mut sessions = 0.0;
    let mut revenue = 0.0;
    for &i in indices {
        let guia = &dataset.guias[i];
        sessions += guia.sessions().unwrap_or(0.0);
        revenue += guia.total();
    }
    MonthSummary {
        guias: indices.len(),
        sessions,
        revenue,
    }
}

// ---------------------------------------------------------------------------
// Group-by revenue
// ---------------------------------------------------------------------------

/// One group of the revenue breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueEntry {
    pub label: String,
    pub revenue: f64,
}

/// Sum `VALOR_TOTAL_SESSOES` per distinct value of `column`, descending by
/// revenue. Ties order by label so the charts are deterministic; rows with a
/// null group value fall under the empty label.
pub fn revenue_by(dataset: &GuiaDataset, indices: &[usize], column: &str) -> Vec<RevenueEntry> {
    let mut groups: std::collections::BTreeMap<String, f64> = std::collections::BTreeMap::new();
    for &i in indices {
        let guia = &dataset.guias[i];
        *groups.entry(guia.label(column)).or_insert(0.0) += guia.total();
    }

    let mut entries: Vec<RevenueEntry> = groups
        .into_iter()
        .map(|(label, revenue)| RevenueEntry { label, revenue })
        .collect();
    entries.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.label.cmp(&b.label))
    });
    entries
}

/// How many professionals / patients the ranking charts show.
pub const TOP_PROFESSIONALS: usize = 10;
pub const TOP_PATIENTS: usize = 20;

pub fn top_professionals(dataset: &GuiaDataset, indices: &[usize]) -> Vec<RevenueEntry> {
    let mut entries = revenue_by(dataset, indices, NOME_PROFISSIONAL);
    entries.truncate(TOP_PROFESSIONALS);
    entries
}

pub fn top_patients(dataset: &GuiaDataset, indices: &[usize]) -> Vec<RevenueEntry> {
    let mut entries = revenue_by(dataset, indices, NOME_PACIENTE);
    entries.truncate(TOP_PATIENTS);
    entries
}

// ---------------------------------------------------------------------------
// Specialty Pareto
// ---------------------------------------------------------------------------

/// One bar of the Pareto view, with the running cumulative share.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoEntry {
    pub label: String,
    pub revenue: f64,
    pub cumulative: f64,
    /// Cumulative share of the month total, 0–100.
    pub cumulative_pct: f64,
}

/// Revenue per specialty, descending, with cumulative percentages. The last
/// entry reaches 100 whenever the month total is positive.
pub fn specialty_pareto(dataset: &GuiaDataset, indices: &[usize]) -> Vec<ParetoEntry> {
    let entries = revenue_by(dataset, indices, ESPECIALIDADE);
    let total: f64 = entries.iter().map(|e| e.revenue).sum();

    let mut cumulative = 0.0;
    entries
        .into_iter()
        .map(|e| {
            cumulative += e.revenue;
            let cumulative_pct = if total > 0.0 {
                100.0 * cumulative / total
            } else {
                0.0
            };
            ParetoEntry {
                label: e.label,
                revenue: e.revenue,
                cumulative,
                cumulative_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::build_dataset;
    use crate::data::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// Tiny dataset: two months, three specialties.
    fn dataset() -> GuiaDataset {
        let headers: Vec<String> = vec![
            "Nome Paciente".into(),
            "Número Carteira".into(),
            "Número Guia".into(),
            "Especialidade".into(),
            "Nome Profissional".into(),
            "Tipo Atendimento".into(),
            "Número Sessões".into(),
            "Valor Sessão".into(),
            "Mês".into(),
        ];
        let row = |patient: &str, spec: &str, prof: &str, sessions: f64, price: f64, month: &str| {
            vec![
                text(patient),
                CellValue::Integer(1),
                text("G"),
                text(spec),
                text(prof),
                text("Sessão"),
                CellValue::Float(sessions),
                CellValue::Float(price),
                text(month),
            ]
        };
        build_dataset(
            headers,
            vec![
                row("Maria", "Fisioterapia", "Dr. Silva", 4.0, 100.0, "jan"), // 400
                row("João", "Fonoaudiologia", "Dra. Souza", 2.0, 50.0, "jan"), // 100
                row("Maria", "Psicologia", "Dr. Silva", 10.0, 50.0, "jan"),   // 500
                row("Ana", "Fisioterapia", "Dra. Souza", 1.0, 80.0, "fev"),   // 80
            ],
        )
        .unwrap()
    }

    #[test]
    fn filters_by_month_label() {
        let ds = dataset();
        assert_eq!(month_indices(&ds, "jan"), vec![0, 1, 2]);
        assert_eq!(month_indices(&ds, "fev"), vec![3]);
        assert!(month_indices(&ds, "mar").is_empty());
    }

    #[test]
    fn summarizes_the_selected_month() {
        let ds = dataset();
        let summary = month_summary(&ds, &month_indices(&ds, "jan"));
        assert_eq!(summary.guias, 3);
        assert_eq!(summary.sessions, 16.0);
        assert_eq!(summary.revenue, 1000.0);
    }

    #[test]
    fn revenue_groups_sort_descending_with_label_ties() {
        let ds = dataset();
        let by_prof = revenue_by(&ds, &month_indices(&ds, "jan"), NOME_PROFISSIONAL);
        assert_eq!(by_prof[0].label, "Dr. Silva");
        assert_eq!(by_prof[0].revenue, 900.0);
        assert_eq!(by_prof[1].label, "Dra. Souza");
        assert_eq!(by_prof[1].revenue, 100.0);
    }

    #[test]
    fn pareto_cumulative_reaches_one_hundred() {
        let ds = dataset();
        let pareto = specialty_pareto(&ds, &month_indices(&ds, "jan"));
        assert_eq!(pareto.len(), 3);
        assert_eq!(pareto[0].label, "Psicologia");
        assert_eq!(pareto[0].revenue, 500.0);
        assert!((pareto[0].cumulative_pct - 50.0).abs() < 1e-9);
        assert!((pareto[1].cumulative_pct - 90.0).abs() < 1e-9);
        assert!((pareto[2].cumulative_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pareto_of_empty_selection_is_empty() {
        let ds = dataset();
        assert!(specialty_pareto(&ds, &[]).is_empty());
    }

    #[test]
    fn top_rankings_truncate() {
        let ds = dataset();
        let indices = month_indices(&ds, "jan");
        assert_eq!(top_professionals(&ds, &indices).len(), 2);
        assert_eq!(top_patients(&ds, &indices).len(), 2);
        assert_eq!(top_patients(&ds, &indices)[0].label, "Maria");
    }
}
