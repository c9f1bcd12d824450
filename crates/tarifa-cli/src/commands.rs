use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tarifa_core::{
    Catalog, ContractDocument, DetailPanel, Session, SubmissionNotice, SubsectionState,
    build_contract, dispatch_notice,
};
use tarifa_ingest::{DATA_DIR_ENV_VAR, LoadedData, load_data_dir};
use tarifa_model::{ContractOptions, StructureEntry};
use tracing::{info, info_span};

use tarifa_cli::logging::redact_value;
use tarifa_cli::session::{RejectedAction, load_session_file, replay};
use tarifa_cli::sink::LogSink;

use crate::cli::{ContractArgs, DataArgs};

/// Structure entry with the number of catalog rows its first selector offers.
pub struct StructureSummary {
    pub entry: StructureEntry,
    pub option_count: usize,
}

pub struct ContractOutcome {
    pub document: ContractDocument,
    /// Panel of the active subsection, when the active section has one.
    pub panel: Option<DetailPanel>,
    pub rejected: Vec<RejectedAction>,
    pub notice_sent: bool,
}

/// Data directory from the argument, else `TARIFA_DATA_DIR`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var_os(DATA_DIR_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => bail!("no data directory given and {DATA_DIR_ENV_VAR} is not set"),
    }
}

fn load(args: &DataArgs) -> Result<(ContractOptions, LoadedData)> {
    let options =
        ContractOptions::resolve(args.config.as_deref()).context("load contract options")?;
    let dir = resolve_data_dir(args.data_dir.as_deref())?;
    let data = load_data_dir(&dir, options.default_max_additional)
        .with_context(|| format!("load data directory {}", dir.display()))?;
    Ok((options, data))
}

pub fn run_catalog(args: &DataArgs) -> Result<LoadedData> {
    let (_, data) = load(args)?;
    Ok(data)
}

pub fn run_structure(args: &DataArgs) -> Result<Vec<StructureSummary>> {
    let (_, data) = load(args)?;
    let catalog = Catalog::new(data.catalog.rows);
    let summaries = data
        .structure
        .into_iter()
        .map(|entry| {
            let state = SubsectionState::new(entry);
            let option_count = catalog
                .options_for(&state)
                .first()
                .map_or(0, Vec::len);
            StructureSummary {
                entry: state.entry,
                option_count,
            }
        })
        .collect();
    Ok(summaries)
}

pub fn run_contract(args: &ContractArgs) -> Result<ContractOutcome> {
    let (options, data) = load(&args.data)?;
    let session_file = load_session_file(&args.session)?;
    let span = info_span!("contract", titular = redact_value(&session_file.form.titular));
    let _guard = span.enter();

    let mut session = Session::new(Catalog::new(data.catalog.rows), &data.structure);
    let rejected = replay(&mut session, &session_file.actions);
    info!(
        actions = session_file.actions.len(),
        rejected = rejected.len(),
        "session replayed"
    );

    let document = build_contract(&session, &session_file.form, &options);
    let state = session.state();
    let panel = state
        .active_section()
        .map(|section| (section.name.clone(), section.active_subsection.clone()))
        .and_then(|(section, subsection)| session.detail_panel(&section, &subsection).ok());

    let notice = SubmissionNotice::new(options.executive.as_str(), session_file.form.titular.as_str());
    let notice_sent = dispatch_notice(&LogSink, &notice);

    Ok(ContractOutcome {
        document,
        panel,
        rejected,
        notice_sent,
    })
}
