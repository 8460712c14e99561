//! shirabe エントリーポイント

use shirabe::app::App;
use shirabe::error::{display_message, setup_panic_handler};
use shirabe::logging;

fn main() {
    setup_panic_handler();
    logging::init();

    let result = App::new().and_then(|mut app| app.run());

    if let Err(err) = result {
        eprintln!("エラー: {}", display_message(&err));
        std::process::exit(1);
    }
}
