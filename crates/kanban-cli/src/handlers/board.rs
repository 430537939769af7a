use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::BoardId;

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::List => {
            let boards = ctx.list_boards().await?;
            output::output_list(boards)?;
        }
        BoardAction::Show { id } => {
            let board = ctx.open_board(&BoardId::from(id)).await?;
            output::output_success(&board)?;
        }
        BoardAction::Create { name } => {
            let board = ctx.coordinator.create_board(&name).await?;
            output::output_success(&board)?;
        }
        BoardAction::Rename { id, name } => {
            let id = BoardId::from(id);
            ctx.open_board(&id).await?;
            ctx.coordinator.rename_board(&id, &name).await?;
            output::output_success(ctx.coordinator.board(&id))?;
        }
        BoardAction::Delete { id } => {
            let id = BoardId::from(id);
            ctx.coordinator.load_boards().await?;
            ctx.coordinator.delete_board(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }))?;
        }
    }
    Ok(())
}
