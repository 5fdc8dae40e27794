use crate::models::{CompanyModel, ContactModel};

resource! {
    /// Customers, vendors and the account's own companies.
    ///
    /// Available `include` collections: Attachments, Contacts, CustomFields,
    /// Invoices, Notes, Classification.
    CompaniesClient => "/api/v1/Companies", CompanyModel {
        retrieve: retrieve_company,
        update: update_company,
        delete: delete_company,
        create: create_companies,
        query: query_companies,
    }
}

resource! {
    /// People at a company.
    ///
    /// Available `include` collections: Attachments, CustomFields, Notes.
    ContactsClient => "/api/v1/Contacts", ContactModel {
        retrieve: retrieve_contact,
        update: update_contact,
        delete: delete_contact,
        create: create_contacts,
        query: query_contacts,
    }
}
