pub mod evaluation;
pub mod instance;
pub mod merged;
pub mod patient;
pub mod protocol;
pub mod report;
pub mod response;
