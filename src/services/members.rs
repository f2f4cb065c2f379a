//! Member management

use validator::Validate;

use super::{next_id, CatalogService};
use crate::{
    error::{AppError, AppResult, Entity},
    models::{Member, MemberEdit, MemberKind, MemberRole, NewMember},
};

impl CatalogService {
    pub fn members(&self) -> &[Member] {
        &self.data.members
    }

    pub fn find_member(&self, id: i32) -> AppResult<&Member> {
        self.data
            .members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::not_found(Entity::Member, id))
    }

    /// Register a member. Students must carry a roll number; for
    /// librarians it is ignored.
    pub fn add_member(&mut self, member: NewMember) -> AppResult<Member> {
        let member = member.trimmed();
        member.validate()?;

        let kind = match member.role {
            MemberRole::Student => MemberKind::Student {
                roll_number: member.roll_number.ok_or_else(|| {
                    AppError::Validation("Roll number is required for students".to_string())
                })?,
            },
            MemberRole::Librarian => MemberKind::Librarian,
        };

        let created = Member {
            id: next_id(Entity::Member, &self.data.members, |m| m.id)?,
            name: member.name,
            email: member.email,
            phone: member.phone,
            kind,
        };
        self.data.members.push(created.clone());
        self.save();

        tracing::info!("Added {} id={} \"{}\"", member.role, created.id, created.name);
        Ok(created)
    }

    /// Overwrite name, email and phone of the stored member. The roll number
    /// is copied only when both records are students; the variant itself
    /// never changes.
    pub fn update_member(&mut self, member: Member) -> AppResult<Member> {
        if member.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let existing = self
            .data
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or_else(|| AppError::not_found(Entity::Member, member.id))?;

        existing.name = member.name;
        existing.email = member.email;
        existing.phone = member.phone;
        if let (
            MemberKind::Student { roll_number },
            MemberKind::Student {
                roll_number: new_roll,
            },
        ) = (&mut existing.kind, member.kind)
        {
            *roll_number = new_roll;
        }
        let updated = existing.clone();
        self.save();

        tracing::info!("Updated member id={}", updated.id);
        Ok(updated)
    }

    pub fn edit_member(&mut self, id: i32, edit: MemberEdit) -> AppResult<Member> {
        let mut member = self.find_member(id)?.clone();
        edit.apply_to(&mut member);
        self.update_member(member)
    }

    /// Remove a member together with every loan that references it.
    ///
    /// Unlike [`CatalogService::delete_book`], this is not a plain cascade:
    /// copies still out with the member are returned to their books before
    /// the loans are dropped, so available counts stay correct.
    pub fn delete_member(&mut self, id: i32) -> AppResult<Member> {
        let index = self
            .data
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| AppError::not_found(Entity::Member, id))?;

        let removed = self.data.members.remove(index);

        // Copies still out with this member go back on the shelf
        for loan in self.data.loans.iter().filter(|l| l.member_id == id && !l.is_returned()) {
            if let Some(book) = self.data.books.iter_mut().find(|b| b.id == loan.book_id) {
                book.return_one();
            }
        }

        let before = self.data.loans.len();
        self.data.loans.retain(|l| l.member_id != id);
        let dropped = before - self.data.loans.len();
        self.save();

        tracing::info!("Deleted member id={} and {} loan record(s)", id, dropped);
        Ok(removed)
    }
}
