use crate::error::Result;
use aster_models::{Animal, AnimalRecord};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AnimalRepository {
    pool: PgPool,
}

impl AnimalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All animals of an organization, ordered by name
    pub async fn list_by_organization(&self, organization_id: Uuid) -> Result<Vec<Animal>> {
        let animals = sqlx::query_as::<_, Animal>(
            r#"
            SELECT *
            FROM animals
            WHERE organization_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(animals)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Animal>> {
        let animal = sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(animal)
    }

    pub async fn create(&self, organization_id: Uuid, record: &AnimalRecord) -> Result<Animal> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            INSERT INTO animals (
                name, species, sex, color, birth_date, is_neutered,
                last_vax, is_primo_vax, last_deworm, is_first_deworm,
                information, organization_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&record.name)
        .bind(&record.species)
        .bind(record.sex)
        .bind(&record.color)
        .bind(record.birth_date)
        .bind(record.is_neutered)
        .bind(record.last_vax)
        .bind(record.is_primo_vax)
        .bind(record.last_deworm)
        .bind(record.is_first_deworm)
        .bind(&record.information)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(animal)
    }

    /// Overwrite an animal's fields. The owning organization never changes;
    /// there is no transfer operation.
    pub async fn update(&self, id: Uuid, record: &AnimalRecord) -> Result<Animal> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            UPDATE animals
            SET name = $1,
                species = $2,
                sex = $3,
                color = $4,
                birth_date = $5,
                is_neutered = $6,
                last_vax = $7,
                is_primo_vax = $8,
                last_deworm = $9,
                is_first_deworm = $10,
                information = $11
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&record.name)
        .bind(&record.species)
        .bind(record.sex)
        .bind(&record.color)
        .bind(record.birth_date)
        .bind(record.is_neutered)
        .bind(record.last_vax)
        .bind(record.is_primo_vax)
        .bind(record.last_deworm)
        .bind(record.is_first_deworm)
        .bind(&record.information)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(animal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Database, DatabaseConfig};
    use crate::repositories::members::MemberRepository;
    use crate::repositories::organizations::OrganizationRepository;
    use aster_models::{NewMember, Sex};
    use chrono::NaiveDate;

    fn record(name: &str) -> AnimalRecord {
        AnimalRecord {
            name: name.to_string(),
            species: "cat".to_string(),
            sex: Some(Sex::F),
            color: "tabby".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2023, 4, 15).unwrap(),
            is_neutered: true,
            last_vax: None,
            is_primo_vax: false,
            last_deworm: Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            is_first_deworm: true,
            information: None,
        }
    }

    #[tokio::test]
    #[ignore] // Only run with database available
    async fn test_create_update_list_round_trip() {
        let db = Database::new(DatabaseConfig::from_env())
            .await
            .expect("Failed to connect to database");
        let animals = AnimalRepository::new(db.pool().clone());

        let unique = Uuid::new_v4();
        let founder = MemberRepository::new(db.pool().clone())
            .create(
                &NewMember {
                    first_name: "Keeper".to_string(),
                    last_name: "Test".to_string(),
                    email: format!("keeper-{}@example.com", unique),
                    phone_number: format!("+33{}", &unique.simple().to_string()[..9]),
                },
                "$argon2id$test-hash",
            )
            .await
            .unwrap();
        let org = OrganizationRepository::new(db.pool().clone())
            .create_with_founder(founder.id, &format!("shelter-{}", unique))
            .await
            .unwrap();

        let created = animals.create(org.id, &record("Zora")).await.unwrap();
        assert_eq!(created.organization_id, org.id);
        assert!(created.last_vax.is_none());

        animals.create(org.id, &record("Abel")).await.unwrap();
        let listed = animals.list_by_organization(org.id).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Abel", "Zora"]);

        let mut changed = record("Zora");
        changed.last_vax = Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        changed.is_primo_vax = true;
        let updated = animals.update(created.id, &changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.last_vax, changed.last_vax);
        assert!(updated.is_primo_vax);
    }
}
