use anyhow::Result;
use microblog::examples::tour;
use microblog::render::Renderer;

use crate::examples::ExampleGroup;
use crate::output::{OutputFormat, OutputManager};
use crate::views::TourTranscript;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Walkthrough",
    commands: &[
        "microblog tour                              # Run every operation on the sample network",
        "microblog --no-color tour                   # ASCII tables",
        "microblog --output json tour                # Steps as a JSON array",
    ],
}];

pub fn handle_tour(output: &OutputManager) -> Result<()> {
    let steps = tour::run(Renderer::new(output.options.no_color))?;
    if output.options.output_format != OutputFormat::Table {
        return output.display(&TourTranscript(steps));
    }
    for step in &steps {
        output.heading(&step.title);
        output.block(&step.output);
    }
    output.success(&format!("Tour finished after {} steps", steps.len()));
    Ok(())
}
