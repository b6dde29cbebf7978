/// Processing level determination for hierarchical log output

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingLevel {
    Root,   // Batch banners
    Stage,  // Per-file results and organizer summaries
    Step,   // Individual actions within a stage
    Detail, // Relayed tool output and supporting information
}

/// Determines the processing level of a log message based on its content
pub fn determine_processing_level(message: &str) -> ProcessingLevel {
    if message.starts_with("Conversion process")
        || message.starts_with("Organizing files")
        || (message.starts_with("Found") && message.contains("file(s) to convert"))
    {
        return ProcessingLevel::Root;
    }

    if message.starts_with("Processing file")
        || message.starts_with("Converted ")
        || message.starts_with("Files have been organized")
        || message.starts_with("Files before organizing")
        || message.starts_with("Files after organizing")
    {
        return ProcessingLevel::Stage;
    }

    if message.starts_with("Moved ")
        || message.starts_with("Created folder")
        || message.starts_with("Would run")
        || message.starts_with("Skipping")
    {
        return ProcessingLevel::Step;
    }

    ProcessingLevel::Detail
}
