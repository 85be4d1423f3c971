//! Well-known FIX tag numbers and administrative MsgType values.
//!
//! Only the tags the client itself touches are named here; application
//! messages carry whatever tags the operator types.

/// BeginString(8).
pub const BEGIN_STRING: u32 = 8;
/// BodyLength(9).
pub const BODY_LENGTH: u32 = 9;
/// CheckSum(10).
pub const CHECK_SUM: u32 = 10;
/// MsgSeqNum(34).
pub const MSG_SEQ_NUM: u32 = 34;
/// MsgType(35).
pub const MSG_TYPE: u32 = 35;
/// SenderCompID(49).
pub const SENDER_COMP_ID: u32 = 49;
/// SendingTime(52).
pub const SENDING_TIME: u32 = 52;
/// Symbol(55).
pub const SYMBOL: u32 = 55;
/// TargetCompID(56).
pub const TARGET_COMP_ID: u32 = 56;
/// EncryptMethod(98).
pub const ENCRYPT_METHOD: u32 = 98;
/// HeartBtInt(108).
pub const HEART_BT_INT: u32 = 108;
/// TestReqID(112).
pub const TEST_REQ_ID: u32 = 112;

/// Administrative MsgType(35) values.
pub mod msg_type {
    /// Heartbeat.
    pub const HEARTBEAT: &str = "0";
    /// Test Request.
    pub const TEST_REQUEST: &str = "1";
    /// Resend Request.
    pub const RESEND_REQUEST: &str = "2";
    /// Session-level Reject.
    pub const REJECT: &str = "3";
    /// Sequence Reset.
    pub const SEQUENCE_RESET: &str = "4";
    /// Logout.
    pub const LOGOUT: &str = "5";
    /// Logon.
    pub const LOGON: &str = "A";
}

/// Tags owned by the session layer. User-supplied copies of these are
/// dropped when the standard header is stamped onto an outgoing message.
pub const SESSION_TAGS: [u32; 7] = [
    BEGIN_STRING,
    BODY_LENGTH,
    CHECK_SUM,
    MSG_SEQ_NUM,
    SENDER_COMP_ID,
    SENDING_TIME,
    TARGET_COMP_ID,
];
