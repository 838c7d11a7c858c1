//! Page objects for every screen of the bank.

pub mod account;
pub mod dashboard;
pub mod dialog;
pub mod generate_transfer;
pub mod last_operations;
pub mod login;
pub mod navigation;
pub mod phone_top_up;
pub mod quick_transfer;

pub use account::{AccountDetail, AccountWidget};
pub use dashboard::DashboardPage;
pub use dialog::CompletedDialog;
pub use generate_transfer::GenerateTransferPage;
pub use last_operations::{LastOperations, OperationColumn};
pub use login::{LoginField, LoginPage};
pub use navigation::{Arrival, Destination, Navigation};
pub use phone_top_up::{PhoneTopUp, TopUpConfirmation};
pub use quick_transfer::{QuickTransfer, TransferConfirmation};
