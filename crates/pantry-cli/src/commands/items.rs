use std::io::{self, Read};

use pantry_core::{DecrementOutcome, PhotoPayload};

use crate::app::AppContext;
use crate::cli::{AddArgs, RemoveArgs, ShowArgs};
use crate::output::{print_item, print_status};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let photo = read_photo(args)?;
    let ledger = ctx.open_ledger()?;

    let item = ledger.increment(&args.name, photo.as_ref())?;

    let suffix = if photo.is_some() { " with photo" } else { "" };
    print_status(
        &format!(
            "Added {}{} (quantity {})",
            item.display_name(),
            suffix,
            item.quantity
        ),
        ctx.quiet(),
    );
    Ok(())
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;

    let message = match ledger.decrement(&args.name)? {
        DecrementOutcome::Decremented(quantity) => {
            format!("Removed one {} (quantity {})", args.name, quantity)
        }
        DecrementOutcome::Removed => format!("Removed {} from the inventory", args.name),
        DecrementOutcome::Absent => {
            format!("{} is not in the inventory; nothing removed", args.name)
        }
    };
    print_status(&message, ctx.quiet());
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let item = ledger.get(&args.name)?;
    print_item(&item, args.json, ctx.quiet())
}

fn read_photo(args: &AddArgs) -> anyhow::Result<Option<PhotoPayload>> {
    if let Some(path) = &args.photo {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read photo {}: {}", path.display(), e))?;
        return Ok(Some(PhotoPayload::from_bytes(bytes)?));
    }

    if let Some(data) = &args.photo_data {
        let text = if data == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
            buffer
        } else {
            data.clone()
        };
        return Ok(Some(PhotoPayload::parse(&text)?));
    }

    Ok(None)
}
