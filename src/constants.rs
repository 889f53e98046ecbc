/// Chat endpoint used when neither config file nor environment names one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";

/// Model identifier sent to the chat endpoint
pub const DEFAULT_MODEL: &str = "llama3.2";

/// One draft is generated for each of these sampling temperatures
pub const DEFAULT_TEMPERATURES: [f32; 3] = [0.1, 0.4, 0.7];

/// Connect / response timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_DOCUMENTS_DIR: &str = "documents";

pub const DEFAULT_DATABASE_PATH: &str = "dagverslag.db";

pub const DEFAULT_PORT: u16 = 3000;

/// Highest temperature accepted in configuration
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Instruction placed in front of the caregiver's notes; `{client}` is replaced by the client's name
pub const REPORT_PROMPT: &str = "Schrijf een verslag voor dagbesteding in tegenwoordige tijd. \
Houd het feitelijk en maak het niet te lang. Geef het een opmaak met kopjes. \
Het verslag gaat over {client}.\n";

/// Instruction used by the interactive mode, where the notes name the client themselves
pub const INTERACTIVE_PROMPT: &str =
    "Schrijf een verslag voor dagbesteding in tegenwoordige tijd. Houd het feitelijk en maak het niet te lang.\n";

/// Question asked by the interactive mode
pub const INTERACTIVE_QUESTION: &str = "Over wie gaat het en wat moet er in het verslag?";
