//! English and Vietnamese labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Vi];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Vi => "Tiếng Việt",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "vi" => Ok(Self::Vi),
            other => Err(format!("unsupported locale `{other}`, expected en or vi")),
        }
    }
}

/// Every translatable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    // columns
    Number,
    Account,
    Bank,
    Amount,
    Message,
    Status,
    Type,
    Time,
    CreatedAt,
    Predict,
    Stream,
    WinResult,
    Paid,
    Streamer,
    YoutubeLink,
    Duration,
    TotalPlay,
    TotalAmount,
    Result,
    StartTime,
    EndTime,
    // badges
    Win,
    Lose,
    Undetermined,
    PaidYes,
    PaidNo,
    InProgress,
    Completed,
    Success,
    Pending,
    Failed,
    // pages
    Users,
    Transactions,
    Predicts,
    BalanceHistory,
    LiveStreams,
    Dashboard,
    // table chrome
    Loading,
    NoData,
    Retry,
    Previous,
    Next,
    RowsPerPage,
    Showing,
    To,
    Of,
    // forms
    Username,
    Password,
    SignIn,
    SignOut,
    SigningIn,
    Welcome,
    Search,
    All,
    Apply,
    Clear,
    CreateLiveStream,
    Create,
    Cancel,
    Close,
    Details,
    UpdateResult,
    MarkWin,
    MarkLose,
    VideoId,
    Language,
    UserId,
    VietnamTime,
    CreatedLiveStreamFor,
}

impl Locale {
    pub fn t(self, text: Text) -> &'static str {
        match self {
            Self::En => en(text),
            Self::Vi => vi(text),
        }
    }
}

fn en(text: Text) -> &'static str {
    match text {
        Text::Number => "#",
        Text::Account => "Account",
        Text::Bank => "Bank",
        Text::Amount => "Amount",
        Text::Message => "Message",
        Text::Status => "Status",
        Text::Type => "Type",
        Text::Time => "Time",
        Text::CreatedAt => "Created At",
        Text::Predict => "Predict",
        Text::Stream => "Stream",
        Text::WinResult => "Result",
        Text::Paid => "Paid",
        Text::Streamer => "Streamer",
        Text::YoutubeLink => "YouTube Link",
        Text::Duration => "Duration",
        Text::TotalPlay => "Total Play",
        Text::TotalAmount => "Total Amount",
        Text::Result => "Result",
        Text::StartTime => "Start Time",
        Text::EndTime => "End Time",
        Text::Win => "Win",
        Text::Lose => "Lose",
        Text::Undetermined => "Undetermined",
        Text::PaidYes => "Paid",
        Text::PaidNo => "Unpaid",
        Text::InProgress => "In progress",
        Text::Completed => "Completed",
        Text::Success => "Success",
        Text::Pending => "Pending",
        Text::Failed => "Failed",
        Text::Users => "Users",
        Text::Transactions => "Transactions",
        Text::Predicts => "Predicts",
        Text::BalanceHistory => "Balance History",
        Text::LiveStreams => "Livestreams",
        Text::Dashboard => "Dashboard",
        Text::Loading => "Loading...",
        Text::NoData => "No data available",
        Text::Retry => "Retry",
        Text::Previous => "Previous",
        Text::Next => "Next",
        Text::RowsPerPage => "Rows per page",
        Text::Showing => "Showing",
        Text::To => "to",
        Text::Of => "of",
        Text::Username => "Username",
        Text::Password => "Password",
        Text::SignIn => "Sign in",
        Text::SignOut => "Sign out",
        Text::SigningIn => "Signing in...",
        Text::Welcome => "Welcome",
        Text::Search => "Search",
        Text::All => "All",
        Text::Apply => "Apply",
        Text::Clear => "Clear",
        Text::CreateLiveStream => "Create livestream",
        Text::Create => "Create",
        Text::Cancel => "Cancel",
        Text::Close => "Close",
        Text::Details => "Details",
        Text::UpdateResult => "Update result",
        Text::MarkWin => "Mark as win",
        Text::MarkLose => "Mark as lose",
        Text::VideoId => "Video ID",
        Text::Language => "Language",
        Text::UserId => "User ID",
        Text::VietnamTime => "Vietnam time (UTC+7)",
        Text::CreatedLiveStreamFor => "Created livestream for",
    }
}

fn vi(text: Text) -> &'static str {
    match text {
        Text::Number => "#",
        Text::Account => "Tài khoản",
        Text::Bank => "Ngân hàng",
        Text::Amount => "Số tiền",
        Text::Message => "Tin nhắn",
        Text::Status => "Trạng thái",
        Text::Type => "Loại",
        Text::Time => "Thời gian",
        Text::CreatedAt => "Ngày tạo",
        Text::Predict => "Dự đoán",
        Text::Stream => "Luồng",
        Text::WinResult => "Kết quả",
        Text::Paid => "Đã trả",
        Text::Streamer => "Người phát",
        Text::YoutubeLink => "Link YouTube",
        Text::Duration => "Thời lượng",
        Text::TotalPlay => "Tổng lượt chơi",
        Text::TotalAmount => "Tổng tiền",
        Text::Result => "Kết quả",
        Text::StartTime => "Thời gian bắt đầu",
        Text::EndTime => "Thời gian kết thúc",
        Text::Win => "Thắng",
        Text::Lose => "Thua",
        Text::Undetermined => "Chưa xác định",
        Text::PaidYes => "Đã trả",
        Text::PaidNo => "Chưa trả",
        Text::InProgress => "Đang diễn ra",
        Text::Completed => "Đã kết thúc",
        Text::Success => "Thành công",
        Text::Pending => "Đang xử lý",
        Text::Failed => "Thất bại",
        Text::Users => "Người dùng",
        Text::Transactions => "Giao dịch",
        Text::Predicts => "Dự đoán",
        Text::BalanceHistory => "Lịch sử số dư",
        Text::LiveStreams => "Livestream",
        Text::Dashboard => "Bảng điều khiển",
        Text::Loading => "Đang tải...",
        Text::NoData => "Không có dữ liệu",
        Text::Retry => "Thử lại",
        Text::Previous => "Trước",
        Text::Next => "Sau",
        Text::RowsPerPage => "Số dòng mỗi trang",
        Text::Showing => "Hiển thị",
        Text::To => "đến",
        Text::Of => "trong",
        Text::Username => "Tên đăng nhập",
        Text::Password => "Mật khẩu",
        Text::SignIn => "Đăng nhập",
        Text::SignOut => "Đăng xuất",
        Text::SigningIn => "Đang đăng nhập...",
        Text::Welcome => "Xin chào",
        Text::Search => "Tìm kiếm",
        Text::All => "Tất cả",
        Text::Apply => "Áp dụng",
        Text::Clear => "Xóa lọc",
        Text::CreateLiveStream => "Tạo livestream",
        Text::Create => "Tạo",
        Text::Cancel => "Hủy",
        Text::Close => "Đóng",
        Text::Details => "Chi tiết",
        Text::UpdateResult => "Cập nhật kết quả",
        Text::MarkWin => "Đánh dấu thắng",
        Text::MarkLose => "Đánh dấu thua",
        Text::VideoId => "Mã video",
        Text::Language => "Ngôn ngữ",
        Text::UserId => "Mã người dùng",
        Text::VietnamTime => "Giờ Việt Nam (UTC+7)",
        Text::CreatedLiveStreamFor => "Đã tạo livestream cho",
    }
}
