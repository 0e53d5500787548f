/// Alias for `Result<T, RollCallError>`.
pub type RcResult<T> = Result<T, RollCallError>;

/// Errors raised by roll-call operations.
///
/// Every variant is recoverable: the operation that produced it leaves all
/// state untouched and the message is meant to be shown to the user as a
/// transient notice.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RollCallError {
    /// A selection was attempted with no participants on the roster.
    #[error("请先添加学生名单")]
    EmptyRoster,

    /// A draw asked for more distinct names than the roster holds.
    #[error("学生总数不足 {requested} 人")]
    InsufficientCandidates {
        /// How many names were requested.
        requested: usize,
        /// How many names the roster holds.
        available: usize,
    },

    /// The speech engine refused or failed to speak.
    #[error("语音播放失败，请检查语音设置 ({0})")]
    SpeechUnavailable(String),

    /// A selection or countdown cycle is already in flight.
    #[error("正在进行中，请稍候")]
    Busy,

    /// Nothing is running that could be paused.
    #[error("当前没有进行中的点名")]
    NotRunning,

    /// A countdown duration below one second.
    #[error("请输入有效的时间")]
    InvalidDuration,

    /// A name that does not resolve to anyone on the roster.
    #[error("名单中没有 \"{name}\"{}", suggestion_hint(.suggestion))]
    UnknownParticipant {
        /// The name as typed.
        name: String,
        /// The closest roster name, if any came close.
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!("，是否是 \"{s}\"？"),
        None => String::new(),
    }
}
