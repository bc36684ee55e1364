//! Command handlers for the terminal front end.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::{bail, Context};
use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use founder_compass::adapters::{
    exporter_for, FileTokenStore, HttpAdminApi, HttpDiagnosticApi, MockDiagnosticApi,
};
use founder_compass::application::{
    AdminConsole, AdminError, DeliveryDispatcher, FlowController, FlowError, FlowEvent,
    LeadOutcome, ResultsLoader, ResultsView, SubmissionClient, SubmissionOutcome,
};
use founder_compass::config::AppConfig;
use founder_compass::domain::catalog::{Question, QuestionCatalog, QuestionKind};
use founder_compass::domain::diagnostic::IgnoredReason;
use founder_compass::domain::lead::{CompanySizeBand, LeadRegistration};
use founder_compass::ports::{DiagnosticApi, ExportFormat, TokenKey, TokenStore};

use crate::cli::AdminCommands;

/// Environment variable holding the admin password for non-interactive login.
const ADMIN_PASSWORD_ENV: &str = "FOUNDER_COMPASS_ADMIN_PASSWORD";

/// Everything a command needs, built once from configuration.
pub struct AppContext {
    config: AppConfig,
    tokens: Arc<dyn TokenStore>,
    api: Arc<dyn DiagnosticApi>,
    offline: bool,
}

impl AppContext {
    pub fn new(config: AppConfig, offline: bool) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.storage.token_path));
        let api: Arc<dyn DiagnosticApi> = if offline {
            Arc::new(MockDiagnosticApi::new())
        } else {
            Arc::new(
                HttpDiagnosticApi::new(config.api.backend())
                    .context("failed to build the backend client")?,
            )
        };

        tracing::debug!(
            base_url = %config.api.normalized_base_url(),
            token_path = %config.storage.token_path.display(),
            offline,
            "context initialized"
        );

        Ok(Self {
            config,
            tokens,
            api,
            offline,
        })
    }

    fn submission_client(&self) -> SubmissionClient {
        SubmissionClient::new(self.api.clone(), self.tokens.clone())
    }

    fn results_loader(&self) -> ResultsLoader {
        ResultsLoader::new(self.api.clone(), self.tokens.clone(), self.config.report.renderer())
    }

    fn dispatcher(&self, format: ExportFormat) -> DeliveryDispatcher {
        DeliveryDispatcher::new(self.api.clone(), exporter_for(format))
    }

    fn admin_console(&self) -> anyhow::Result<AdminConsole> {
        if self.offline {
            bail!("admin commands need the backend; drop --offline");
        }
        let api = HttpAdminApi::new(self.config.api.backend())
            .context("failed to build the admin client")?;
        Ok(AdminConsole::new(Arc::new(api), self.tokens.clone()))
    }

    async fn catalog(&self) -> anyhow::Result<Arc<QuestionCatalog>> {
        let Some(path) = &self.config.flow.catalog_path else {
            return Ok(Arc::new(QuestionCatalog::founder_diagnostic()));
        };
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = QuestionCatalog::from_yaml(&source)
            .with_context(|| format!("invalid catalog {}", path.display()))?;
        tracing::info!(path = %path.display(), questions = catalog.len(), "catalog loaded");
        Ok(Arc::new(catalog))
    }
}

pub async fn start(
    ctx: &AppContext,
    name: String,
    email: String,
    company_size: CompanySizeBand,
) -> anyhow::Result<()> {
    let lead = LeadRegistration::new(name, email, company_size);
    match ctx.submission_client().register_lead(&lead).await? {
        LeadOutcome::Registered(lead_ref) => {
            println!("Welcome, {}. Your lead reference is {}.", lead.name, lead_ref);
            println!("Run `founder-compass diagnose` to begin.");
        }
        LeadOutcome::Degraded(error) => {
            println!("We could not save your details ({}).", error);
            println!("You can continue, but the diagnostic needs a registered lead to start.");
        }
    }
    Ok(())
}

pub async fn diagnose(ctx: &AppContext) -> anyhow::Result<()> {
    let catalog = ctx.catalog().await?;
    let settings = ctx.config.flow.settings();
    let mut flow = match FlowController::start(catalog, ctx.submission_client(), settings).await {
        Ok(flow) => flow,
        Err(FlowError::MissingLead) => {
            bail!("no lead registered; run `founder-compass start` first")
        }
        Err(error) => return Err(error.into()),
    };

    println!("Type your answer and press Enter. Enter `:back` for the previous question.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !flow.is_complete() {
        show_question(&flow);
        let Some(line) = lines.next_line().await? else {
            bail!("input closed before the diagnostic finished");
        };
        let input = line.trim();

        if input == ":back" {
            if !flow.retreat() {
                println!("You are at the first question.");
            }
            continue;
        }

        // Blank input keeps an earlier answer when revisiting a question.
        if !input.is_empty() {
            let question = flow.current_question();
            match resolve_answer(&question, input) {
                Some(answer) => flow.set_answer(&question.id, answer)?,
                None => {
                    println!("Please choose one of the listed options.");
                    continue;
                }
            }
        }

        run_until_input(&mut flow).await;
    }

    Ok(())
}

/// Follows the flow through affirmations until it needs the user again.
async fn run_until_input(flow: &mut FlowController) {
    let mut event = flow.advance().await;
    loop {
        match event {
            FlowEvent::Affirming { message, .. } => {
                println!("\n  {}\n", message);
                match flow.await_affirmation().await {
                    Some(next) => event = next,
                    None => return,
                }
            }
            FlowEvent::Ignored(IgnoredReason::Unanswered(_)) => {
                println!("An answer is required to continue.");
                return;
            }
            FlowEvent::Ignored(_) | FlowEvent::Question(_) => return,
            FlowEvent::Completed(SubmissionOutcome::Stored(_)) => {
                println!("Thanks! Your answers are in. Run `founder-compass results` to see your report.");
                return;
            }
            FlowEvent::Completed(SubmissionOutcome::Failed { .. }) => {
                println!("Thanks! We could not submit your answers, so no report is available yet.");
                return;
            }
        }
    }
}

fn show_question(flow: &FlowController) {
    let progress = flow.progress();
    let question = flow.current_question();

    println!();
    println!("[{}/{}] {}%", progress.position, progress.total, progress.percent);
    println!("{}", question.text);
    if question.kind == QuestionKind::SingleChoice {
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
    }
    if let Some(placeholder) = &question.placeholder {
        println!("  e.g. {}", placeholder);
    }
    let answers = flow.answers();
    let current = answers.get(&question.id);
    if !current.is_empty() {
        println!("  (current answer: {}; press Enter to keep it)", current);
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Maps raw input to the stored answer. Single-choice questions accept an
/// option number or the option text.
fn resolve_answer(question: &Question, input: &str) -> Option<String> {
    match question.kind {
        QuestionKind::Text => Some(input.to_string()),
        QuestionKind::SingleChoice => {
            if let Ok(n) = input.parse::<usize>() {
                return n
                    .checked_sub(1)
                    .and_then(|i| question.options.get(i))
                    .cloned();
            }
            question
                .options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(input))
                .cloned()
        }
    }
}

pub async fn results(
    ctx: &AppContext,
    output: Option<std::path::PathBuf>,
    format: ExportFormat,
) -> anyhow::Result<()> {
    match ctx.results_loader().load().await? {
        ResultsView::RedirectToLanding => {
            println!("No results yet. Run `founder-compass start`, then `founder-compass diagnose`.");
        }
        ResultsView::Unavailable { result_ref, error } => {
            bail!("could not load results for {}: {}", result_ref, error);
        }
        ResultsView::Ready { document, .. } => {
            print!("{}", document.to_plain_text());
            if let Some(path) = output {
                let artifact = ctx.dispatcher(format).download(&document)?;
                tokio::fs::write(&path, &artifact.content)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("\nSaved {} ({} bytes).", path.display(), artifact.len());
            }
        }
    }
    Ok(())
}

pub async fn email(ctx: &AppContext) -> anyhow::Result<()> {
    let (result_ref, document) = match ctx.results_loader().load().await? {
        ResultsView::Ready {
            result_ref,
            document,
            ..
        } => (result_ref, document),
        ResultsView::RedirectToLanding => bail!("no results to email yet"),
        ResultsView::Unavailable { result_ref, error } => {
            bail!("could not load results for {}: {}", result_ref, error)
        }
    };

    match ctx
        .dispatcher(ExportFormat::Pdf)
        .email_deliver(&result_ref, &document)
        .await
    {
        Ok(()) => println!("Your report is on its way."),
        Err(error) => {
            println!("Email failed: {}", error);
            println!("You can still save it with `founder-compass results --output report.pdf`.");
        }
    }
    Ok(())
}

pub async fn admin(ctx: &AppContext, action: AdminCommands) -> anyhow::Result<()> {
    let console = ctx.admin_console()?;
    let result = match action {
        AdminCommands::Login { email } => {
            let password = read_admin_password().await?;
            console.login(&email, &password).await.map(|()| {
                println!("Logged in.");
            })
        }
        AdminCommands::Stats => console.stats().await.map(|stats| {
            println!("Total leads:      {}", stats.total_leads);
            println!("Total responses:  {}", stats.total_responses);
            println!("Completion rate:  {:.2}%", stats.completion_rate);
        }),
        AdminCommands::Responses => console.responses().await.map(|items| {
            for item in items {
                println!(
                    "{}  {:<24} {:<32} {} answers",
                    item.created_at.format("%Y-%m-%d %H:%M"),
                    item.name,
                    item.email,
                    item.answers.len()
                );
            }
        }),
        AdminCommands::Logout => console.logout().await.map(|()| {
            println!("Logged out.");
        }),
    };

    match result {
        Err(AdminError::SessionExpired) => {
            bail!("admin session expired; run `founder-compass admin login` again")
        }
        other => Ok(other?),
    }
}

async fn read_admin_password() -> anyhow::Result<SecretString> {
    if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
        return Ok(SecretString::new(password));
    }
    print!("Password: ");
    let _ = std::io::stdout().flush();
    let mut lines: Lines<BufReader<Stdin>> = BufReader::new(tokio::io::stdin()).lines();
    let password = lines
        .next_line()
        .await?
        .context("no password given")?;
    Ok(SecretString::new(password.trim_end().to_string()))
}

pub async fn reset(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.tokens.clear(TokenKey::LeadRef).await?;
    ctx.tokens.clear(TokenKey::ResultRef).await?;
    println!("Session cleared.");
    Ok(())
}
