//! vault-k8s-auth-cp CLI

use std::process::ExitCode;

use vault_k8s_auth_cp::{
    cli::{Cli, USAGE, render_error},
    observability,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    // Wrong argument count prints usage and exits 0, before any credentials
    // are resolved.
    if cli.mount_pair().is_none() {
        #[expect(clippy::print_stdout, reason = "usage text is the command's output")]
        {
            print!("{USAGE}");
        }

        return ExitCode::SUCCESS;
    }

    if let Err(error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{}", render_error(&error));
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "one-line diagnostic on stderr is the failure contract"
            )]
            {
                eprintln!("{}", render_error(&error));
            }

            ExitCode::FAILURE
        }
    }
}
