//! list-kinds

use colored::Colorize;
use infl_codec::RecordKind;

pub fn run_list_kinds() {
    println!("{}", "Configuration kinds:".bold());
    println!();
    println!("  {:<15} {}", "constants".cyan(), "dispatcher constants".dimmed());
    for kind in RecordKind::ALL {
        println!("  {:<15} {}", kind.plural().cyan(), kind.component_name());
    }
}
