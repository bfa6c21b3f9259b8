use rusty_burette::analysis::{analyze_group, analyze_instrument, run_batch};
use rusty_burette::config::{AnalysisConfig, AppConfig, RenderConfig};
use rusty_burette::data::model::{Experiment, ExperimentSet};
use rusty_burette::render::curve::CurveKind;
use rusty_burette::render::{DistributionRenderer, FigureKind, MarkerKind, PlotDomain};
use rusty_burette::stats::kde::{GaussianKde, arg_max};
use rusty_burette::stats::{RelativeErrorSummary, Significance, StatSummary};

const TOL: f64 = 1e-4;

fn micropipette() -> Experiment {
    Experiment::new(
        "1000μL micropipette",
        1.0,
        0.9968,
        vec![0.9933, 0.9678, 0.9998, 0.9914, 0.9845, 0.9823],
    )
}

fn renderer(render: RenderConfig) -> DistributionRenderer {
    DistributionRenderer::new(render, AnalysisConfig::default())
}

#[test]
fn micropipette_end_to_end() {
    let report = analyze_instrument(&micropipette(), &renderer(RenderConfig::full_analysis()));
    let summary = report.outcome.as_ref().unwrap();

    let expected = [0.9964, 0.9709, 1.0030, 0.9945, 0.9876, 0.9855];
    for (v, e) in summary.volumes.values().iter().zip(expected) {
        assert!((v - e).abs() < TOL, "volume {v} vs {e}");
    }
    assert!((summary.mean() - 0.9897).abs() < TOL);
    assert!((summary.relative_error_pct - -1.03).abs() < 5e-3);

    let fig = report.figure.as_ref().unwrap();
    assert_eq!(fig.kind, FigureKind::Analysis);
    assert_eq!(fig.marker(MarkerKind::Mean).unwrap().x, summary.mean());
    assert_eq!(fig.marker(MarkerKind::Target).unwrap().x, 1.0);
    assert!(fig.domain.contains(summary.mean() - 4.0 * summary.std_dev()));
}

#[test]
fn constant_sample_is_degenerate_not_fatal() {
    let flat = Experiment::new("flat", 1.0, 1.0, vec![1.0; 4]);
    let report = analyze_instrument(&flat, &renderer(RenderConfig::full_analysis()));
    let summary = report.outcome.as_ref().unwrap();

    assert_eq!(summary.std_dev(), 0.0);
    assert_eq!(summary.relative_error_pct, 0.0);
    assert!(summary.t_test.is_degenerate());
    assert!(summary.kde_peak.is_none());
    assert!(GaussianKde::new(summary.volumes.values()).is_err());

    let fig = report.figure.as_ref().unwrap();
    assert!(fig.curves.is_empty());
    assert!(!fig.notes.is_empty());
}

#[test]
fn constant_weights_never_look_significant() {
    for (weights, density) in [(vec![0.9933; 6], 0.9968), (vec![0.1; 3], 1.0)] {
        let exp = Experiment::new("repeated", 1.0, density, weights);
        let report = analyze_instrument(&exp, &renderer(RenderConfig::full_analysis()));
        let summary = report.outcome.as_ref().unwrap();

        assert_eq!(summary.std_dev(), 0.0);
        assert_eq!(summary.mean(), summary.volumes.values()[0]);
        assert!(summary.t_test.is_degenerate());
        assert_eq!(
            summary.t_test.significance(0.05),
            Significance::Undetermined
        );

        let fig = report.figure.as_ref().unwrap();
        assert_eq!(fig.domain, PlotDomain::around(summary.mean(), 0.5));
        assert!(fig.curves.is_empty());
        assert!(fig.sigma_ticks.is_empty());

        let rel = RelativeErrorSummary::compute(&exp).unwrap();
        assert!(rel.location.is_degenerate());
    }
}

#[test]
fn group_overlay_shares_domain_and_keeps_member_statistics() {
    let small = micropipette();
    let large = Experiment::new(
        "10mL burette",
        10.0,
        0.9968,
        vec![9.9431, 9.9863, 10.0258, 9.9627, 10.0105, 9.9771],
    );
    let grouped = renderer(RenderConfig::group_overlay());
    let report = analyze_group("Mixed", &[&small, &large], &grouped);

    assert!(report.skipped.is_empty());
    assert_eq!(report.figures.len(), 2);

    let isolated: Vec<_> = [&small, &large]
        .iter()
        .map(|e| RelativeErrorSummary::compute(e).unwrap())
        .collect();
    assert_eq!(report.members, isolated);

    let domain = PlotDomain::group(&isolated).unwrap();
    let max_sd = isolated
        .iter()
        .map(|s| s.location.std_dev)
        .fold(f64::MIN, f64::max);
    let all_errors = || isolated.iter().flat_map(|s| s.errors.values().iter().copied());
    let lo = all_errors().fold(f64::MAX, f64::min);
    let hi = all_errors().fold(f64::MIN, f64::max);
    assert!(domain.x_min <= lo - 4.0 * max_sd);
    assert!(domain.x_max >= hi + 4.0 * max_sd);
    assert!(domain.x_min > lo - 4.0 * max_sd - 0.1);
    assert!(domain.x_max < hi + 4.0 * max_sd + 0.1);

    for fig in &report.figures {
        assert_eq!(fig.domain, domain);
        assert_eq!(fig.series_count(), 2);
    }

    let t_fig = report
        .figures
        .iter()
        .find(|f| f.kind == FigureKind::GroupTOverlay)
        .unwrap();
    for (label, member) in t_fig.peaks.iter().zip(&isolated) {
        assert_eq!(label.peak.x, member.location.mean);
    }

    let kde_fig = report
        .figures
        .iter()
        .find(|f| f.kind == FigureKind::GroupKdeOverlay)
        .unwrap();
    for (label, member) in kde_fig.peaks.iter().zip(&isolated) {
        let kde = GaussianKde::new(member.errors.values()).unwrap();
        let points = kde.evaluate(&domain.grid(AnalysisConfig::default().grid_points));
        let (x, _) = arg_max(&points).unwrap();
        assert_eq!(label.peak.x, x);
    }
    assert!(kde_fig.curves.iter().all(|c| c.kind == CurveKind::Kde));
}

#[test]
fn overlay_does_not_change_single_summaries() {
    let set = ExperimentSet::builtin();
    let report = run_batch(&set, &AppConfig::default());
    for (exp, inst) in set.experiments.iter().zip(&report.instruments) {
        let alone = StatSummary::compute(exp, &AnalysisConfig::default()).unwrap();
        assert_eq!(inst.outcome.as_ref().unwrap(), &alone);
    }
}

#[test]
fn condensed_preset_draws_only_t_and_sigma_lines() {
    let report = analyze_instrument(&micropipette(), &renderer(RenderConfig::condensed()));
    let fig = report.figure.unwrap();
    assert_eq!(fig.kind, FigureKind::Condensed);
    assert!(fig.curves.iter().all(|c| c.kind == CurveKind::TDistribution));
    assert!(fig.marker(MarkerKind::TrimmedMean).is_none());
    assert!(fig.marker(MarkerKind::Sigma(-3)).is_some());
    assert!(fig.marker(MarkerKind::Sigma(3)).is_some());
}
