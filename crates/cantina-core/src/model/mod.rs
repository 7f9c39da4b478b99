// ── Domain model ──
//
// Wire shapes of every entity the back office manages, plus the request
// payloads sent to create or change them. Field names follow the server's
// camelCase JSON.

pub mod account;
pub mod customer;
pub mod id;
pub mod inventory;
pub mod payment_method;
pub mod person;
pub mod product;
pub mod sale;
pub mod user;

pub use account::{Account, AccountCreditRequest, AccountTransaction};
pub use customer::{
    BalanceChangeRequest, BalanceEntry, BalanceType, CreateCustomerRequest, Customer,
    CustomerSales, UpdateCustomerRequest,
};
pub use id::{Resource, ResourceId};
pub use inventory::{
    AddStockRequest, CreateInventoryRequest, Inventory, InventoryMovement, InventoryReport,
    LowStockItem, MovementType, StockMovementRequest, StockStatus, UpdateInventoryRequest,
};
pub use payment_method::PaymentMethod;
pub use person::{CreatePersonRequest, Person, ResponsibleSummary, UpdatePersonRequest};
pub use product::{
    Category, CreateCategoryRequest, CreateProductRequest, Product, UpdateCategoryRequest,
    UpdateProductRequest,
};
pub use sale::{
    CreateSaleItem, CreateSaleRequest, PaymentBreakdown, PaymentKind, Sale, SaleItem, SaleStatus,
    SalesSummary,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, Role, User, VerifyTokenResponse};
