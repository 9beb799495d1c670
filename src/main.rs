//! StudyBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use teloxide::{prelude::*, types::Update};
use tracing::{error, info, warn};

use StudyBuddy::{
    config::Settings,
    database::{connection::create_pool, repositories::StudentRepository},
    engine::{FlowEngine, Interaction},
    presentation::{main_menu, PresentationSink},
    state::{FlowKind, StateTracker},
    telegram::{flow_from_token, interaction_from_message, TelegramSink},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer flushing until exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting StudyBuddy Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = StudyBuddy::database::connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..Default::default()
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    StudyBuddy::database::connection::run_migrations(&db_pool).await?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Wire the engine: Postgres store, in-memory state tracker, Telegram sink
    let store = Arc::new(StudentRepository::new(db_pool));
    let tracker = StateTracker::new();
    let sink = Arc::new(TelegramSink::new(bot.clone()));
    let engine = Arc::new(FlowEngine::new(store, tracker, sink.clone()));

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![engine, sink])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("StudyBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("StudyBuddy bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "StudyBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Add a new student")]
    Add,
    #[command(description = "Edit a student record")]
    Edit,
    #[command(description = "Delete a student record")]
    Del,
    #[command(description = "Find students by name")]
    FindByName,
    #[command(description = "Find students by grade")]
    FindByGrade,
}

const WELCOME_TEXT: &str = "Hi! I keep track of student records. Pick an operation:";

/// Handle bot commands
async fn handle_commands(
    msg: Message,
    cmd: BotCommands,
    engine: Arc<FlowEngine>,
    sink: Arc<TelegramSink>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let result = match cmd {
        BotCommands::Start => {
            // A command always abandons whatever form was in progress.
            engine.tracker().delete_context(user_id).await?;
            sink.send(user_id, WELCOME_TEXT, Some(main_menu())).await
        }
        BotCommands::Help => {
            sink.send(user_id, &BotCommands::descriptions().to_string(), Some(main_menu()))
                .await
        }
        BotCommands::Add => engine.start_flow(user_id, FlowKind::Add).await.map(|_| ()),
        BotCommands::Edit => engine.start_flow(user_id, FlowKind::Edit).await.map(|_| ()),
        BotCommands::Del => engine.start_flow(user_id, FlowKind::Delete).await.map(|_| ()),
        BotCommands::FindByName => engine
            .start_flow(user_id, FlowKind::FindByName)
            .await
            .map(|_| ()),
        BotCommands::FindByGrade => engine
            .start_flow(user_id, FlowKind::FindByGrade)
            .await
            .map(|_| ()),
    };

    if let Err(e) = result {
        error!(user_id = user_id, error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(msg: Message, engine: Arc<FlowEngine>) -> HandlerResult {
    let Some(interaction) = interaction_from_message(&msg) else {
        return Ok(());
    };
    let user_id = interaction.user_id;

    if let Err(e) = engine.advance(interaction).await {
        if e.is_recoverable() {
            warn!(user_id = user_id, error = %e, "Recoverable error handling message");
        } else {
            error!(user_id = user_id, error = %e, "Error handling message");
            return Err(e.into());
        }
    }

    Ok(())
}

/// Handle callback queries (inline keyboard button presses)
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    engine: Arc<FlowEngine>,
    sink: Arc<TelegramSink>,
) -> HandlerResult {
    let user_id = query.from.id.0 as i64;

    // Answer first to remove the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data else {
        return Ok(());
    };

    let result = if let Some(flow) = flow_from_token(&data) {
        engine.start_flow(user_id, flow).await.map(|_| ())
    } else if data == "menu:help" {
        sink.send(user_id, &BotCommands::descriptions().to_string(), Some(main_menu()))
            .await
    } else {
        engine
            .advance(Interaction::selection(user_id, data))
            .await
            .map(|_| ())
    };

    if let Err(e) = result {
        if e.is_recoverable() {
            warn!(user_id = user_id, error = %e, "Recoverable error handling callback");
        } else {
            error!(user_id = user_id, error = %e, "Error handling callback query");
            return Err(e.into());
        }
    }

    Ok(())
}
