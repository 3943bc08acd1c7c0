use pantry_core::InventoryState;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{parse_output_format, print_item_list};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ledger = ctx.open_ledger()?;

    let mut state = InventoryState::load(&ledger)?;
    if let Some(query) = &args.search {
        state = state.with_search(query.as_str());
    }

    print_item_list(&state.visible(), args.json, format, ctx.quiet())
}
