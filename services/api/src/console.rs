use crate::infra::{build_narrator, build_service, parse_answer_pair, parse_category};
use chrono::Local;
use clap::Args;
use empathy_profile::config::AppConfig;
use empathy_profile::error::AppError;
use empathy_profile::questionnaire::{
    likert_options, Advance, AnswerImportError, AnswerSet, AnswerSheetImporter, Category,
    NarrativeSource, ProfileReport, QuestionBank, ScoreOutcome, Session, SessionError,
};
use empathy_profile::telemetry::{self, LogSink};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct TakeArgs {
    /// Skip narrative generation and use the standard descriptions
    #[arg(long)]
    pub(crate) offline: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// CSV answer sheet with `item_id,value` columns
    #[arg(long, conflicts_with = "answers")]
    pub(crate) answers_csv: Option<PathBuf>,
    /// Single answer as ID=VALUE; repeat for more items
    #[arg(long = "answer", value_parser = parse_answer_pair)]
    pub(crate) answers: Vec<(u16, i64)>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Skip narrative generation and use the standard descriptions
    #[arg(long)]
    pub(crate) offline: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ItemsArgs {
    /// Only list items of one category (self, others, object, situation)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<Category>,
}

pub(crate) async fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    let service = build_service(build_narrator(&config.narrative, args.offline)?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new(service.bank());

    match take_questionnaire(&mut session, stdin.lock(), &mut out)? {
        Some(outcome) => {
            writeln!(out, "\nPreparing your results...")?;
            let report = service.report(outcome).await;
            render_report(&report, &mut out)?;
        }
        None => writeln!(out, "\nQuestionnaire closed before the last item; nothing was scored.")?,
    }
    Ok(())
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    let service = build_service(build_narrator(&config.narrative, args.offline)?);
    let bank = service.bank();

    let answers = match args.answers_csv {
        Some(path) => AnswerSheetImporter::from_path(path, &bank)?,
        None => AnswerSet::from_raw(&bank, args.answers).map_err(AnswerImportError::from)?,
    };

    let report = service.assess(answers).await;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        render_report(&report, &mut out)?;
    }
    Ok(())
}

pub(crate) fn run_items(args: ItemsArgs) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_items(QuestionBank::standard(), args.category, &mut out)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Answer(i64),
    Back,
    Quit,
    Unrecognised,
}

fn parse_reply(line: &str) -> Reply {
    match line.trim().to_ascii_lowercase().as_str() {
        "b" | "back" => Reply::Back,
        "q" | "quit" => Reply::Quit,
        other => other.parse().map(Reply::Answer).unwrap_or(Reply::Unrecognised),
    }
}

/// Walk `session` through the catalogue reading one reply per line.
///
/// Returns `None` when the respondent quits or input ends before the last item.
pub(crate) fn take_questionnaire<R, W>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<Option<ScoreOutcome>, AppError>
where
    R: BufRead,
    W: Write,
{
    let total = session.bank().item_count();
    let mut item = session.start()?;
    let mut lines = input.lines();

    writeln!(out, "Empathy profile questionnaire ({total} items)")?;
    for option in likert_options() {
        writeln!(out, "  {} = {}", option.value, option.label)?;
    }

    loop {
        writeln!(
            out,
            "\n[{}/{}] {:>3.0}%  {}",
            session.current_index() + 1,
            total,
            session.progress() * 100.0,
            item.text
        )?;
        if let Some(previous) = session.answer_for(item.id) {
            writeln!(out, "  current answer: {} ({})", previous.value(), previous.label())?;
        }
        write!(out, "  1-5, b = back, q = quit > ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };

        match parse_reply(&line?) {
            Reply::Answer(value) => match session.record_answer(item.id, value) {
                Ok(Advance::Next(next)) => item = next,
                Ok(Advance::Completed(outcome)) => return Ok(Some(outcome)),
                Err(SessionError::Answer(err)) => writeln!(out, "  {err}")?,
                Err(err) => return Err(err.into()),
            },
            Reply::Back => item = session.go_to_previous()?,
            Reply::Quit => return Ok(None),
            Reply::Unrecognised => writeln!(out, "  please answer with a number from 1 to 5")?,
        }
    }
}

pub(crate) fn render_report<W: Write>(report: &ProfileReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nYour empathy profile: {}", report.dominant.label)?;
    writeln!(
        out,
        "Completed {}",
        report
            .completed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    )?;
    if !report.is_complete() {
        writeln!(
            out,
            "Note: {} unanswered item(s) were scored as neutral.",
            report.unanswered
        )?;
    }

    writeln!(out, "\nCategory scores")?;
    for category in Category::ordered() {
        writeln!(out, "  {:<10} {:>3}", category.label(), report.scores.get(category))?;
    }

    writeln!(out, "\nProfile chart")?;
    for axis in &report.radar {
        let filled = usize::from(axis.score) * 20 / usize::from(axis.full_mark.max(1));
        writeln!(
            out,
            "  {:<17} {:>3}/{} {}",
            axis.label,
            axis.score,
            axis.full_mark,
            "#".repeat(filled)
        )?;
    }

    for section in report.sections() {
        writeln!(out, "\n{} ({})", section.title, section.score)?;
        writeln!(out, "  {}", section.description)?;
    }

    if report.narrative_source == NarrativeSource::Fallback {
        writeln!(out, "\n(standard descriptions shown; personalised text was unavailable)")?;
    }
    Ok(())
}

fn render_items<W: Write>(
    bank: QuestionBank,
    category: Option<Category>,
    out: &mut W,
) -> io::Result<()> {
    for item in bank
        .all_items()
        .filter(|item| category.map_or(true, |wanted| item.category == wanted))
    {
        let marker = if item.is_reversed { " (reversed)" } else { "" };
        writeln!(
            out,
            "{:>4}  {:<9} {}{}",
            item.id.0,
            item.category.key(),
            item.text,
            marker
        )?;
    }
    Ok(())
}
