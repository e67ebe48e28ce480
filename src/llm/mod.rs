pub mod invocation;
pub mod llm_interface;
pub mod mentorpiece_llm;
pub mod message;

pub use invocation::{Invocation, InvocationRequest, InvocationResult};
pub use llm_interface::LlmInterface;
pub use mentorpiece_llm::MentorpieceLLM;
pub use message::{build_prompt, Message};
