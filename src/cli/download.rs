use anyhow::Result;
use std::io::Write;
use std::path::Path;

use softstore::catalog::Catalog;
use softstore::download::{DownloadRun, DownloadTiming, Phase, artifact};

enum Outcome {
    Ready,
    Cancelled,
    Stopped,
}

pub async fn run(catalog: &Catalog, key: &str, dir: &Path) -> Result<()> {
    let app = super::find_app(catalog, key)?.clone();
    println!("Downloading {} v{}", app.name, app.version);

    let mut run = DownloadRun::start(app.clone(), DownloadTiming::default());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            _ = &mut ctrl_c => break Outcome::Cancelled,
            phase = run.next() => match phase {
                Some(Phase::Scanning { progress }) => {
                    print!("\rScanning for viruses... {progress:>3}%");
                    std::io::stdout().flush()?;
                }
                Some(Phase::Preparing) => {
                    println!("\rScanning for viruses... 100% ✓");
                    println!("Preparing download...");
                }
                Some(Phase::Ready) => break Outcome::Ready,
                None => break Outcome::Stopped,
            },
        }
    };

    match outcome {
        Outcome::Ready => {
            let path = artifact::save(dir, &app)?;
            println!("✓ Download ready: {}", path.display());
            println!("  Verified safe · {} · {}", app.license, app.os);
        }
        Outcome::Cancelled => {
            run.dismiss();
            println!();
            println!("Download cancelled.");
        }
        Outcome::Stopped => {
            anyhow::bail!("Download of {} stopped before it finished", app.name);
        }
    }

    Ok(())
}
