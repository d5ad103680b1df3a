pub mod events;
pub mod orders;
pub mod organizers;
pub mod ticket_purchases;
pub mod ticket_types;
pub mod users;

pub use events::Entity as Events;
pub use orders::Entity as Orders;
pub use organizers::Entity as Organizers;
pub use ticket_purchases::Entity as TicketPurchases;
pub use ticket_types::Entity as TicketTypes;
pub use users::Entity as Users;
