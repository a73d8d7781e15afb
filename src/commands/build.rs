use std::path::PathBuf;

use anyhow::Result;
use specbuild::{BuildEventSink, BuildOptions, Config};

use crate::presentation::factory;
use crate::ui::ci::{CiProvider, CiPublisher};
use crate::ui::progress::{CiEventSink, ConsoleEventSink, JsonEventSink};
use crate::ui::terminal::TerminalCapabilities;

pub fn cmd_build(
    config: Config,
    input: Option<PathBuf>,
    force: bool,
    working_dir: PathBuf,
    json: bool,
    caps: TerminalCapabilities,
) -> Result<()> {
    let publisher = CiProvider::detect()
        .map(|provider| CiPublisher::new(provider, config.ci.clone()).with_json(json));

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "build",
            "force": force,
        }))?;
    }

    let pipeline = factory::create_pipeline(config);
    let options = BuildOptions::new(working_dir)
        .with_input(input)
        .with_force(force);

    let progress: Box<dyn BuildEventSink> = if json {
        Box::new(JsonEventSink)
    } else {
        Box::new(ConsoleEventSink::new(caps))
    };
    let sink = CiEventSink::new(progress.as_ref(), publisher.as_ref());

    let artifacts = match pipeline.run(&options, &sink) {
        Ok(artifacts) => artifacts,
        Err(err) => {
            // Document failures go to CI as a variable before the run ends.
            if let (Some(publisher), Some(message)) = (&publisher, err.document_message()) {
                publisher.publish_error(message);
            }
            return Err(err.into());
        }
    };

    if json {
        let mut record = serde_json::to_value(&artifacts)?;
        record["event"] = "complete".into();
        record["command"] = "build".into();
        crate::ui::json::emit(record)?;
    } else {
        println!("{}", artifacts.html.display());
        println!("{}", artifacts.pdf.display());
        println!("{}", artifacts.zip.display());
    }

    Ok(())
}
