use codelens_core::{
    local_report, merge_reports, CriticalError, IssueCounts, Optimization, QualityLabel, Report,
    ReportOrigin, SecurityIssue, Warning,
};
use proptest::prelude::*;

fn terminated_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|name| format!("int {name} = 0;")),
        "[a-z]{1,8}".prop_map(|name| format!("{name}();")),
        Just("// comment".to_string()),
        Just("@Override".to_string()),
        Just(String::new()),
        Just("return;".to_string()),
    ]
}

fn balanced_class() -> impl Strategy<Value = String> {
    prop::collection::vec(terminated_statement(), 0..20).prop_map(|body| {
        let mut source = String::from("public class Demo {\n    void run() {\n");
        for line in body {
            source.push_str("        ");
            source.push_str(&line);
            source.push('\n');
        }
        source.push_str("    }\n}\n");
        source
    })
}

fn remote_report(critical: usize, warning: usize, optimization: usize, security: usize) -> Report {
    Report::new(
        vec![CriticalError::default(); critical],
        vec![Warning::default(); warning],
        vec![Optimization::default(); optimization],
        vec![SecurityIssue::default(); security],
        ReportOrigin::Merged,
    )
}

proptest! {
    #[test]
    fn balanced_terminated_source_is_clean(source in balanced_class()) {
        let report = local_report(&source);
        prop_assert_eq!(report.summary.critical_count, 0);
        prop_assert_eq!(report.summary.warning_count, 0);
        prop_assert_eq!(report.summary.overall_code_quality, QualityLabel::Good);
    }

    #[test]
    fn one_unmatched_brace_is_one_critical(source in balanced_class(), extra_at in 0usize..4) {
        // open one more block on a line of its own, somewhere before the end
        let mut lines: Vec<&str> = source.lines().collect();
        let insert_at = extra_at.min(lines.len());
        lines.insert(insert_at, "static {");
        let broken = lines.join("\n");

        let last_open = broken
            .split('\n')
            .enumerate()
            .filter(|(_, l)| l.contains('{'))
            .map(|(i, _)| i as u32 + 1)
            .last();

        let report = local_report(&broken);
        prop_assert_eq!(report.critical_errors.len(), 1);
        prop_assert_eq!(&report.critical_errors[0].description, "Missing 1 closing brace(s) '}'.");
        prop_assert_eq!(report.critical_errors[0].line, last_open);
        prop_assert_eq!(report.summary.overall_code_quality, QualityLabel::CriticalIssues);
    }

    #[test]
    fn merge_counts_are_additive(
        source in "[a-z ;{}\n]{0,80}",
        critical in 0usize..4,
        warning in 0usize..6,
        optimization in 0usize..4,
        security in 0usize..4,
    ) {
        let local = local_report(&source);
        let merged = merge_reports(local.clone(), Some(remote_report(critical, warning, optimization, security)));

        prop_assert_eq!(merged.summary.critical_count, local.summary.critical_count + critical);
        prop_assert_eq!(merged.summary.warning_count, local.summary.warning_count + warning);
        prop_assert_eq!(merged.summary.optimization_count, optimization);
        prop_assert_eq!(merged.summary.security_count, security);
        prop_assert_eq!(
            merged.summary.total_issues,
            merged.summary.critical_count + merged.summary.warning_count + optimization + security
        );
    }

    #[test]
    fn quality_is_pure_and_critical_dominates(
        critical in 0usize..5,
        warning in 0usize..10,
        optimization in 0usize..5,
        security in 0usize..5,
        merged in any::<bool>(),
    ) {
        let counts = IssueCounts { critical, warning, optimization, security };
        let origin = if merged { ReportOrigin::Merged } else { ReportOrigin::Local };

        let first = QualityLabel::derive(&counts, origin);
        prop_assert_eq!(first, QualityLabel::derive(&counts, origin));
        if critical > 0 {
            prop_assert_eq!(first, QualityLabel::CriticalIssues);
        }
        if first == QualityLabel::Excellent {
            prop_assert_eq!(counts.total(), 0);
        }
    }
}
