//! Resource endpoints of the private API
//!
//! Every path is relative to the client's base URL.

// Session
pub const LOGIN: &str = "resource/UserSessionResource/create/";
pub const LOGOUT: &str = "resource/UserSessionResource/delete/";
pub const LOGIN_PAGE: &str = "login/";

// Pins
pub const CREATE_PIN: &str = "resource/PinResource/create/";
pub const UPDATE_PIN: &str = "resource/PinResource/update/";
pub const DELETE_PIN: &str = "resource/PinResource/delete/";
pub const PIN_INFO: &str = "resource/PinResource/get/";
pub const REPIN: &str = "resource/RepinResource/create/";
pub const LIKE_PIN: &str = "resource/PinLikeResource/create/";
pub const UNLIKE_PIN: &str = "resource/PinLikeResource/delete/";
pub const DOMAIN_FEED: &str = "resource/DomainFeedResource/get/";
pub const ACTIVITY: &str = "resource/AggregatedActivityFeedResource/get/";
pub const USER_FEED: &str = "resource/UserHomefeedResource/get/";
pub const RELATED_PINS: &str = "resource/RelatedPinFeedResource/get/";
pub const VISUAL_SIMILAR_PINS: &str = "resource/VisualLiveSearchResource/get/";
pub const BULK_COPY: &str = "resource/BulkEditResource/create/";
pub const BULK_MOVE: &str = "resource/BulkEditResource/update/";
pub const BULK_DELETE: &str = "resource/BulkEditResource/delete/";

// Search, uploads and messages
pub const SEARCH: &str = "resource/BaseSearchResource/get/";
pub const UPLOAD_IMAGE: &str = "upload-image/";
pub const SEND_MESSAGE: &str = "resource/ConversationsResource/create/";

// Password
pub const RESET_PASSWORD_SEND_LINK: &str = "resource/UserResetPasswordResource/create/";
pub const RESET_PASSWORD_UPDATE: &str = "resource/ResetPasswordFromEmailResource/update/";
pub const CHANGE_PASSWORD: &str = "resource/UserPasswordResource/update/";

// User
pub const GET_USER_SETTINGS: &str = "resource/UserSettingsResource/get/";
pub const UPDATE_USER_SETTINGS: &str = "resource/UserSettingsResource/update/";
pub const CONVERT_TO_BUSINESS: &str = "resource/BusinessAccountResource/create/";
pub const DEACTIVATE_ACCOUNT: &str = "resource/DeactivateAccountResource/create/";
pub const INVITE: &str = "resource/EmailInviteSentResource/create/";

// Boards
pub const GET_BOARDS: &str = "resource/BoardsResource/get/";
pub const GET_BOARD: &str = "resource/BoardResource/get/";
pub const CREATE_BOARD: &str = "resource/BoardResource/create/";
pub const UPDATE_BOARD: &str = "resource/BoardResource/update/";
pub const DELETE_BOARD: &str = "resource/BoardResource/delete/";
pub const BOARD_FEED: &str = "resource/BoardFeedResource/get/";
pub const FOLLOW_BOARD: &str = "resource/BoardFollowResource/create/";
pub const UNFOLLOW_BOARD: &str = "resource/BoardFollowResource/delete/";
