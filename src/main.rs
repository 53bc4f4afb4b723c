use taskpad::cli::run;
use taskpad::store::StoreError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("TASKPAD_LOG", "warn"))
        .format_timestamp(None)
        .init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        // Missing or ambiguous task references are the user's mistake
        let user_error = e
            .downcast_ref::<StoreError>()
            .map(StoreError::is_user_error)
            .unwrap_or(false);
        if user_error {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }

        eprintln!("Internal error: {}", e);
        let mut source = e.source();
        if source.is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        std::process::exit(2);
    }
}
