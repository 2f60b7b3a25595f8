use std::path::PathBuf;

use anyhow::Context;
use hist_overlay::data::selection::{filter_selection, init_filter_state};
use hist_overlay::histogram::uniform_edges;
use hist_overlay::kinematics::{dilepton_candidates, DEFAULT_MASS_WINDOW, JPSI_MASS};
use hist_overlay::sample::{dilepton_events, lepton_pair, DileptonSample};
use hist_overlay::{
    render, Dataset, EguiBackend, FieldValue, Record, Scale, Selection, Series, StyleConfig,
    VariableSpec,
};

const MUON: i64 = 13;
const ELECTRON: i64 = 11;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional first argument: JSON style file.
    let style = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading style file {}", path.display()))?;
            StyleConfig::from_json(&json)
                .with_context(|| format!("parsing style file {}", path.display()))?
        }
        None => StyleConfig::default(),
    };

    let mut records = dilepton_events(&DileptonSample::default()).records;
    records.extend(
        dilepton_events(&DileptonSample {
            seed: 43,
            run: "2024D".into(),
            ..DileptonSample::default()
        })
        .records,
    );
    let events = Dataset::from_records(records);
    log::info!("generated {} dilepton events", events.len());

    let mut runs = init_filter_state(&events);
    runs.insert("run".into(), [FieldValue::from("2024C")].into());
    let run_c = filter_selection(&events, &runs);
    runs.insert("run".into(), [FieldValue::from("2024D")].into());
    let run_d = filter_selection(&events, &runs);

    let same_sign = Selection::where_record(&events, |rec| pdg_product(rec).is_some_and(|p| p > 0));
    let jpsi = Selection::where_record(&events, |rec| {
        lepton_pair(rec).is_some_and(|pair| {
            dilepton_candidates(&pair, JPSI_MASS, DEFAULT_MASS_WINDOW)
                .iter()
                .all(|&c| c)
        })
    });

    let os_mumu = Selection::where_record(&events, opposite_sign(MUON));
    let os_ee = Selection::where_record(&events, opposite_sign(ELECTRON));

    let series = [
        Series::new(&events, "2024C, all pairs").with_selection(run_c.clone()),
        Series::new(&events, "2024C, OS \u{03BC}\u{03BC}")
            .with_selection(run_c.and(&os_mumu)?),
        Series::new(&events, "2024C, OS ee").with_selection(run_c.and(&os_ee)?),
        Series::new(&events, "2024C, same sign").with_selection(run_c.and(&same_sign)?),
        Series::new(&events, "2024D, J/\u{03C8} candidates").with_selection(run_d.and(&jpsi)?),
    ];

    let variable = VariableSpec::new("mll", "m_ll [GeV]", uniform_edges(0.0, 8.0, 80))
        .with_y_scale(Scale::Log);

    let mut backend = EguiBackend {
        window_title: "Dilepton invariant mass".into(),
    };
    render(&series, &variable, &style, &mut backend)?;
    Ok(())
}

fn opposite_sign(flavour: i64) -> impl Fn(&Record) -> bool {
    move |rec| pdg_product(rec) == Some(-flavour * flavour)
}

fn pdg_product(rec: &Record) -> Option<i64> {
    match (rec.get("pdgId1")?, rec.get("pdgId2")?) {
        (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a * b),
        _ => None,
    }
}
