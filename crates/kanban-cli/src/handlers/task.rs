use crate::cli::{TaskAction, TaskAddArgs, TaskFieldArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_core::Editable;
use kanban_domain::{BoardId, ColumnId, FieldUpdate, Progress, TaskFields, TaskId, TaskUpdate};
use kanban_remote::parse_remote_date;

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add(args) => handle_add(ctx, args).await,
        TaskAction::Update(args) => handle_update(ctx, args).await,
        TaskAction::Move {
            board_id,
            id,
            column_id,
            position,
        } => {
            let board_id = BoardId::from(board_id);
            let task_id = TaskId::from(id);
            let column_id = ColumnId::from(column_id);
            let board = ctx.open_board(&board_id).await?;
            let index = position.unwrap_or_else(|| {
                board
                    .column(&column_id)
                    .map(|c| c.tasks.len())
                    .unwrap_or(0)
            });

            ctx.coordinator
                .move_task(&board_id, &task_id, &column_id, index)
                .await?;
            let location = ctx
                .coordinator
                .board(&board_id)
                .and_then(|b| b.find_task(&task_id));
            output::output_success(location.map(|l| {
                serde_json::json!({
                    "task": l.task,
                    "column_id": l.column_id,
                    "position": l.index,
                })
            }))
        }
        TaskAction::Delete { board_id, id } => {
            let board_id = BoardId::from(board_id);
            let task_id = TaskId::from(id);
            ctx.open_board(&board_id).await?;
            ctx.coordinator.delete_task(&board_id, &task_id).await?;
            output::output_success(serde_json::json!({ "deleted": task_id }))
        }
    }
}

async fn handle_add(ctx: &CliContext, args: TaskAddArgs) -> anyhow::Result<()> {
    let board_id = BoardId::from(args.board_id);
    let column_id = ColumnId::from(args.column_id);
    ctx.open_board(&board_id).await?;

    let mut draft = ctx.coordinator.new_task_draft(&board_id, &column_id)?;
    let update = TaskUpdate {
        title: Some(args.title),
        ..field_update(&args.fields)?
    };
    update
        .apply(TaskFields::from_entity(&draft))
        .apply_to(&mut draft);

    let task = ctx.coordinator.create_task(&board_id, draft).await?;
    output::output_success(&task)
}

async fn handle_update(ctx: &CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    let board_id = BoardId::from(args.board_id);
    let task_id = TaskId::from(args.id);
    let board = ctx.open_board(&board_id).await?;
    let current = board
        .find_task(&task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", task_id))?;

    let mut update = TaskUpdate {
        title: args.title,
        ..field_update(&args.fields)?
    };
    if args.clear_deadline {
        update.deadline = FieldUpdate::Clear;
    }
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one field");
    }

    let fields = update.apply(TaskFields::from_entity(&current.task));
    ctx.coordinator
        .update_task(&board_id, &task_id, fields)
        .await?;

    let task = ctx
        .coordinator
        .board(&board_id)
        .and_then(|b| b.find_task(&task_id))
        .map(|l| l.task);
    output::output_success(task)
}

fn field_update(args: &TaskFieldArgs) -> anyhow::Result<TaskUpdate> {
    let deadline = match &args.deadline {
        Some(raw) => FieldUpdate::Set(
            parse_remote_date(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid deadline '{}'. Use YYYY-MM-DD", raw))?,
        ),
        None => FieldUpdate::NoChange,
    };
    Ok(TaskUpdate {
        title: None,
        description: args.description.clone(),
        priority: args.priority,
        progress: args.progress.map(Progress::new),
        assignee: args.assignee.clone(),
        allocator: args.allocator.clone(),
        deadline,
    })
}
